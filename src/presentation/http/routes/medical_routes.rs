use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::MedicalHandler;

pub fn medical_routes(medical_handler: Arc<MedicalHandler>) -> Router {
    Router::new()
        .route("/medical/summarize_note", post(MedicalHandler::summarize_note))
        .with_state(medical_handler)
}
