use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;

use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};

pub fn health_routes(app_name: String) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(app_name))
}

async fn root_handler(State(app_name): State<Arc<String>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(format!("Welcome to {}", app_name))),
    )
}

async fn health_handler() -> impl IntoResponse {
    let health_response = HealthResponseDto {
        status: "ok".to_string(),
    };

    (StatusCode::OK, Json(health_response))
}
