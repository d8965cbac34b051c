use std::sync::Arc;

use serde::Serialize;

use crate::application::services::VectorStoreService;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};
use crate::domain::value_objects::ChunkMetadata;

#[derive(Debug)]
pub enum ReindexDocumentsError {
    RepositoryError(String),
}

impl std::fmt::Display for ReindexDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReindexDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ReindexDocumentsError {}

impl From<DocumentRepositoryError> for ReindexDocumentsError {
    fn from(error: DocumentRepositoryError) -> Self {
        ReindexDocumentsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReindexDocumentsResponse {
    pub processed: usize,
    pub failed: usize,
}

/// Rebuilds the vector index from the documents table, one document at a
/// time. A document that fails is logged and counted; the rest carry on.
pub struct ReindexDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_store: Arc<VectorStoreService>,
}

impl ReindexDocumentsUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        vector_store: Arc<VectorStoreService>,
    ) -> Self {
        Self {
            document_repository,
            vector_store,
        }
    }

    pub async fn execute(&self) -> Result<ReindexDocumentsResponse, ReindexDocumentsError> {
        let documents = self.document_repository.find_all().await?;
        tracing::info!("Re-indexing {} documents", documents.len());

        let mut response = ReindexDocumentsResponse::default();

        for document in documents {
            let mut metadata = ChunkMetadata::new();
            metadata.set_title(document.title());

            match self
                .vector_store
                .replace_document(document.id(), document.content(), &metadata)
                .await
            {
                Ok(chunks) => {
                    tracing::info!("Document {} re-indexed into {} chunks", document.id(), chunks);
                    response.processed += 1;
                }
                Err(e) => {
                    tracing::error!("Error re-indexing document {}: {}", document.id(), e);
                    response.failed += 1;
                }
            }
        }

        Ok(response)
    }
}
