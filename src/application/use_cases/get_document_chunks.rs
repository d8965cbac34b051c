use std::sync::Arc;

use crate::application::services::VectorStoreService;
use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};

#[derive(Debug)]
pub enum GetDocumentChunksError {
    DocumentNotFound(i32),
    RepositoryError(String),
}

impl std::fmt::Display for GetDocumentChunksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDocumentChunksError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            GetDocumentChunksError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetDocumentChunksError {}

impl From<DocumentRepositoryError> for GetDocumentChunksError {
    fn from(error: DocumentRepositoryError) -> Self {
        match error {
            DocumentRepositoryError::NotFound(id) => GetDocumentChunksError::DocumentNotFound(id),
            _ => GetDocumentChunksError::RepositoryError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetDocumentChunksRequest {
    pub document_id: i32,
}

#[derive(Debug, Clone)]
pub struct GetDocumentChunksResponse {
    pub document_id: i32,
    pub chunks: Vec<DocumentChunk>,
    pub total_count: i64,
}

pub struct GetDocumentChunksUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_store: Arc<VectorStoreService>,
}

impl GetDocumentChunksUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        vector_store: Arc<VectorStoreService>,
    ) -> Self {
        Self {
            document_repository,
            vector_store,
        }
    }

    pub async fn execute(
        &self,
        request: GetDocumentChunksRequest,
    ) -> Result<GetDocumentChunksResponse, GetDocumentChunksError> {
        self.document_repository
            .find_by_id(request.document_id)
            .await?
            .ok_or(GetDocumentChunksError::DocumentNotFound(request.document_id))?;

        let chunks = self
            .vector_store
            .list_chunks(request.document_id)
            .await
            .map_err(|e| GetDocumentChunksError::RepositoryError(e.to_string()))?;
        let total_count = self
            .vector_store
            .count_chunks(request.document_id)
            .await
            .map_err(|e| GetDocumentChunksError::RepositoryError(e.to_string()))?;

        Ok(GetDocumentChunksResponse {
            document_id: request.document_id,
            chunks,
            total_count,
        })
    }
}
