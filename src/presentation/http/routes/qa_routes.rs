use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::QaHandler;

pub fn qa_routes(qa_handler: Arc<QaHandler>) -> Router {
    Router::new()
        .route("/answer_question", post(QaHandler::answer_question))
        .with_state(qa_handler)
}
