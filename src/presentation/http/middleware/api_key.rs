use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::presentation::http::dto::error_response;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Server-side shared secret. An empty key matches nothing.
#[derive(Debug, Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::from(key.into()))
    }

    fn accepts(&self, provided: &str) -> bool {
        !self.0.is_empty() && provided == &*self.0
    }
}

pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Response {
    let provided = match request.headers().get(API_KEY_HEADER) {
        Some(value) => value.to_str().unwrap_or_default(),
        None => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "API Key header is missing",
            );
        }
    };

    if !api_key.accepts(provided) {
        tracing::warn!("Rejected request to {} with invalid API key", request.uri());
        return error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid API Key");
    }

    next.run(request).await
}
