use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::SummarizationService;
use crate::application::services::summarization_service::SummarizationError;
use crate::presentation::http::dto::{MedicalNoteRequestDto, error_response};

pub struct MedicalHandler {
    summarization_service: Arc<SummarizationService>,
}

impl MedicalHandler {
    pub fn new(summarization_service: Arc<SummarizationService>) -> Self {
        Self {
            summarization_service,
        }
    }

    pub async fn summarize_note(
        State(handler): State<Arc<MedicalHandler>>,
        Json(body): Json<MedicalNoteRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .summarization_service
            .summarize_note(&body.note_text)
            .await
        {
            Ok(summary) => Ok((StatusCode::OK, Json(summary)).into_response()),
            Err(e @ SummarizationError::InvalidInput(_)) => Ok(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SUMMARIZATION_FAILED",
                e.to_string(),
            )),
        }
    }
}
