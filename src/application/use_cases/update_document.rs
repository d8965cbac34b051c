use std::sync::Arc;

use crate::application::services::{VectorStoreService, vector_store::VectorStoreError};
use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};
use crate::domain::value_objects::ChunkMetadata;

#[derive(Debug)]
pub enum UpdateDocumentError {
    DocumentNotFound(i32),
    RepositoryError(String),
    /// Re-indexing failed; the document was restored to its previous values.
    IndexingError(String),
}

impl std::fmt::Display for UpdateDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateDocumentError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            UpdateDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            UpdateDocumentError::IndexingError(msg) => write!(
                f,
                "Failed to process updated document for vector store: {}",
                msg
            ),
        }
    }
}

impl std::error::Error for UpdateDocumentError {}

impl From<DocumentRepositoryError> for UpdateDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        match error {
            DocumentRepositoryError::NotFound(id) => UpdateDocumentError::DocumentNotFound(id),
            _ => UpdateDocumentError::RepositoryError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDocumentRequest {
    pub document_id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateDocumentResponse {
    pub document: Document,
}

pub struct UpdateDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_store: Arc<VectorStoreService>,
}

fn title_metadata(document: &Document) -> ChunkMetadata {
    let mut metadata = ChunkMetadata::new();
    metadata.set_title(document.title());
    metadata
}

impl UpdateDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        vector_store: Arc<VectorStoreService>,
    ) -> Self {
        Self {
            document_repository,
            vector_store,
        }
    }

    /// Persists the new values, then swaps the document's chunk set. When
    /// re-indexing fails the row is put back to its previous title and
    /// content. An embedding failure leaves the old chunks in place; a
    /// storage failure re-indexes the previous content on a best-effort basis.
    pub async fn execute(
        &self,
        request: UpdateDocumentRequest,
    ) -> Result<UpdateDocumentResponse, UpdateDocumentError> {
        let previous = self
            .document_repository
            .find_by_id(request.document_id)
            .await?
            .ok_or(UpdateDocumentError::DocumentNotFound(request.document_id))?;

        let mut document = previous.clone();
        document.apply_update(request.title, request.content);
        let document = self.document_repository.update(&document).await?;

        match self
            .vector_store
            .replace_document(document.id(), document.content(), &title_metadata(&document))
            .await
        {
            Ok(chunks_indexed) => {
                tracing::info!("Document {} re-indexed into {} chunks", document.id(), chunks_indexed);
                Ok(UpdateDocumentResponse { document })
            }
            Err(e) => {
                tracing::error!("Re-indexing document {} failed: {}", document.id(), e);
                let chunks_touched = matches!(e, VectorStoreError::RepositoryError(_));
                self.restore(&previous, chunks_touched).await;
                Err(UpdateDocumentError::IndexingError(e.to_string()))
            }
        }
    }

    async fn restore(&self, previous: &Document, reindex: bool) {
        if let Err(e) = self.document_repository.update(previous).await {
            tracing::error!(
                "Failed to restore document {} after indexing error: {}",
                previous.id(),
                e
            );
        }

        if !reindex {
            return;
        }

        if let Err(e) = self
            .vector_store
            .replace_document(previous.id(), previous.content(), &title_metadata(previous))
            .await
        {
            tracing::warn!(
                "Could not re-index previous content of document {}: {}",
                previous.id(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::text_splitter::RecursiveCharacterSplitter;
    use crate::domain::entities::NewDocument;
    use crate::testing::{FakeEmbeddingProvider, InMemoryChunkRepository, InMemoryDocumentRepository};

    struct Fixture {
        documents: Arc<InMemoryDocumentRepository>,
        chunks: Arc<InMemoryChunkRepository>,
        embeddings: Arc<FakeEmbeddingProvider>,
        vector_store: Arc<VectorStoreService>,
        use_case: UpdateDocumentUseCase,
    }

    fn fixture() -> Fixture {
        let documents = Arc::new(InMemoryDocumentRepository::new());
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let vector_store = Arc::new(VectorStoreService::new(
            chunks.clone(),
            embeddings.clone(),
            Arc::new(RecursiveCharacterSplitter::default()),
        ));

        Fixture {
            use_case: UpdateDocumentUseCase::new(documents.clone(), vector_store.clone()),
            documents,
            chunks,
            embeddings,
            vector_store,
        }
    }

    async fn seed(fx: &Fixture, title: &str, content: &str) -> Document {
        let document = fx
            .documents
            .create(&NewDocument::new(title.to_string(), content.to_string()))
            .await
            .unwrap();
        fx.vector_store
            .process_document(document.id(), content, &title_metadata(&document))
            .await
            .unwrap();
        document
    }

    #[tokio::test]
    async fn test_update_replaces_chunks() {
        let fx = fixture();
        let original = seed(&fx, "Visit", "Old assessment.").await;

        let response = fx
            .use_case
            .execute(UpdateDocumentRequest {
                document_id: original.id(),
                title: None,
                content: Some("New assessment with updated plan.".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.document.title(), "Visit");
        assert_eq!(response.document.content(), "New assessment with updated plan.");
        assert_eq!(
            fx.chunks.contents_of(original.id()),
            vec!["New assessment with updated plan."]
        );
    }

    #[tokio::test]
    async fn test_indexing_failure_restores_previous_values() {
        let fx = fixture();
        let original = seed(&fx, "Visit", "Old assessment.").await;
        fx.embeddings.set_failing(true);

        let result = fx
            .use_case
            .execute(UpdateDocumentRequest {
                document_id: original.id(),
                title: Some("Renamed".to_string()),
                content: Some("Rewritten content.".to_string()),
            })
            .await;

        assert!(matches!(result, Err(UpdateDocumentError::IndexingError(_))));

        let stored = fx.documents.snapshot(original.id()).unwrap();
        assert_eq!(stored.title(), "Visit");
        assert_eq!(stored.content(), "Old assessment.");
        assert_eq!(fx.chunks.contents_of(original.id()), vec!["Old assessment."]);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let fx = fixture();

        let result = fx
            .use_case
            .execute(UpdateDocumentRequest {
                document_id: 42,
                title: Some("x".to_string()),
                content: None,
            })
            .await;

        assert!(matches!(result, Err(UpdateDocumentError::DocumentNotFound(42))));
    }
}
