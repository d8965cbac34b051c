use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ExtractionHandler;

pub fn extraction_routes(extraction_handler: Arc<ExtractionHandler>) -> Router {
    Router::new()
        .route("/extraction/extract", post(ExtractionHandler::extract))
        .with_state(extraction_handler)
}
