use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::FhirService;
use crate::presentation::http::dto::{ToFhirRequestDto, error_response};

pub struct FhirHandler {
    fhir_service: Arc<FhirService>,
}

impl FhirHandler {
    pub fn new(fhir_service: Arc<FhirService>) -> Self {
        Self { fhir_service }
    }

    pub async fn to_fhir(
        State(handler): State<Arc<FhirHandler>>,
        Json(body): Json<ToFhirRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .fhir_service
            .convert_to_fhir(&body.structured_data)
            .await
        {
            Ok(conversion) => Ok((StatusCode::OK, Json(conversion)).into_response()),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "FHIR_CONVERSION_FAILED",
                format!("Error converting to FHIR: {}", e),
            )),
        }
    }
}
