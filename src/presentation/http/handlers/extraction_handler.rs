use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::ExtractionService;
use crate::presentation::http::dto::{ApiResponse, ExtractionRequestDto, error_response};

pub struct ExtractionHandler {
    extraction_service: Arc<ExtractionService>,
}

impl ExtractionHandler {
    pub fn new(extraction_service: Arc<ExtractionService>) -> Self {
        Self { extraction_service }
    }

    pub async fn extract(
        State(handler): State<Arc<ExtractionHandler>>,
        Json(body): Json<ExtractionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        if body.text.trim().is_empty() {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "text must not be empty",
            ));
        }

        match handler.extraction_service.extract_entities(&body.text).await {
            Ok(result) => Ok((StatusCode::OK, Json(result)).into_response()),
            Err(e) => {
                tracing::error!("Extraction failed: {}", e);
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error(
                        "EXTRACTION_FAILED".to_string(),
                        e.to_string(),
                        Some(format!("stage: {}", e.stage())),
                    )),
                )
                    .into_response())
            }
        }
    }
}
