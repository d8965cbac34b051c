use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::FhirHandler;

pub fn fhir_routes(fhir_handler: Arc<FhirHandler>) -> Router {
    Router::new()
        .route("/fhir/to_fhir", post(FhirHandler::to_fhir))
        .with_state(fhir_handler)
}
