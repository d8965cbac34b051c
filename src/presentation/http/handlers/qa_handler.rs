use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::QuestionAnsweringService;
use crate::presentation::http::dto::{QuestionRequestDto, error_response};

pub struct QaHandler {
    question_answering_service: Arc<QuestionAnsweringService>,
}

impl QaHandler {
    pub fn new(question_answering_service: Arc<QuestionAnsweringService>) -> Self {
        Self {
            question_answering_service,
        }
    }

    pub async fn answer_question(
        State(handler): State<Arc<QaHandler>>,
        Json(body): Json<QuestionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        if body.question.trim().is_empty() {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "question must not be empty",
            ));
        }

        match handler
            .question_answering_service
            .answer_question(&body.question)
            .await
        {
            Ok(answer) => Ok((StatusCode::OK, Json(answer)).into_response()),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANSWER_FAILED",
                format!("Error processing question: {}", e),
            )),
        }
    }
}
