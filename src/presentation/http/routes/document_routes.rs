use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;
use crate::presentation::http::middleware::{ApiKey, require_api_key};

/// Reads are public; writes require the `X-API-Key` header.
pub fn document_routes(document_handler: Arc<DocumentHandler>, api_key: ApiKey) -> Router {
    let protected = Router::new()
        .route("/documents", post(DocumentHandler::create_document))
        .route("/documents/reindex", post(DocumentHandler::reindex_documents))
        .route(
            "/documents/{document_id}",
            put(DocumentHandler::update_document).delete(DocumentHandler::delete_document),
        )
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key));

    Router::new()
        .route("/documents", get(DocumentHandler::list_documents))
        .route("/documents/{document_id}", get(DocumentHandler::get_document))
        .route(
            "/documents/{document_id}/chunks",
            get(DocumentHandler::get_document_chunks),
        )
        .merge(protected)
        .with_state(document_handler)
}
