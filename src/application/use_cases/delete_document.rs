use std::sync::Arc;

use crate::application::services::VectorStoreService;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};

#[derive(Debug)]
pub enum DeleteDocumentError {
    DocumentNotFound(i32),
    RepositoryError(String),
    IndexError(String),
}

impl std::fmt::Display for DeleteDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteDocumentError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            DeleteDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            DeleteDocumentError::IndexError(msg) => write!(f, "Failed to delete document: {}", msg),
        }
    }
}

impl std::error::Error for DeleteDocumentError {}

impl From<DocumentRepositoryError> for DeleteDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        match error {
            DocumentRepositoryError::NotFound(id) => DeleteDocumentError::DocumentNotFound(id),
            _ => DeleteDocumentError::RepositoryError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDocumentRequest {
    pub document_id: i32,
}

#[derive(Debug, Clone)]
pub struct DeleteDocumentResponse {
    pub chunks_deleted: usize,
}

pub struct DeleteDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_store: Arc<VectorStoreService>,
}

impl DeleteDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        vector_store: Arc<VectorStoreService>,
    ) -> Self {
        Self {
            document_repository,
            vector_store,
        }
    }

    /// Chunks go first; if that fails the row is left in place.
    pub async fn execute(
        &self,
        request: DeleteDocumentRequest,
    ) -> Result<DeleteDocumentResponse, DeleteDocumentError> {
        let document_id = request.document_id;

        if self.document_repository.find_by_id(document_id).await?.is_none() {
            return Err(DeleteDocumentError::DocumentNotFound(document_id));
        }

        let chunks_deleted = self
            .vector_store
            .delete_document(document_id)
            .await
            .map_err(|e| DeleteDocumentError::IndexError(e.to_string()))?;

        if !self.document_repository.delete(document_id).await? {
            return Err(DeleteDocumentError::DocumentNotFound(document_id));
        }

        Ok(DeleteDocumentResponse { chunks_deleted })
    }
}
