use std::sync::Arc;

use crate::application::services::VectorStoreService;
use crate::domain::entities::{Document, NewDocument};
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};
use crate::domain::value_objects::ChunkMetadata;

#[derive(Debug)]
pub enum CreateDocumentError {
    ValidationError(String),
    RepositoryError(String),
    /// The document could not be indexed; the stored row was removed again.
    IndexingError(String),
}

impl std::fmt::Display for CreateDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            CreateDocumentError::IndexingError(msg) => write!(
                f,
                "Failed to process document for vector store: {}",
                msg
            ),
        }
    }
}

impl std::error::Error for CreateDocumentError {}

impl From<DocumentRepositoryError> for CreateDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        CreateDocumentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CreateDocumentResponse {
    pub document: Document,
    pub chunks_indexed: usize,
}

pub struct CreateDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_store: Arc<VectorStoreService>,
}

impl CreateDocumentUseCase {
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
        request: CreateDocumentRequest,
    ) -> Result<CreateDocumentResponse, CreateDocumentError> {
        if request.title.trim().is_empty() {
            return Err(CreateDocumentError::ValidationError(
                "Document title cannot be empty".to_string(),
            ));
        }

        let document = self
            .document_repository
            .create(&NewDocument::new(request.title, request.content))
            .await?;

        let mut metadata = ChunkMetadata::new();
        metadata.set_title(document.title());

        match self
            .vector_store
            .process_document(document.id(), document.content(), &metadata)
            .await
        {
            Ok(chunks_indexed) => Ok(CreateDocumentResponse {
                document,
                chunks_indexed,
            }),
            Err(e) => {
                tracing::error!("Indexing document {} failed: {}", document.id(), e);

                // The row must not outlive a failed indexing pass.
                if let Err(rollback) = self.document_repository.delete(document.id()).await {
                    tracing::error!(
                        "Failed to remove document {} after indexing error: {}",
                        document.id(),
                        rollback
                    );
                }

                Err(CreateDocumentError::IndexingError(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::text_splitter::{RecursiveCharacterSplitter, TextSplitter};
    use crate::testing::{FakeEmbeddingProvider, InMemoryChunkRepository, InMemoryDocumentRepository};

    struct Fixture {
        documents: Arc<InMemoryDocumentRepository>,
        chunks: Arc<InMemoryChunkRepository>,
        embeddings: Arc<FakeEmbeddingProvider>,
        use_case: CreateDocumentUseCase,
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
            use_case: CreateDocumentUseCase::new(documents.clone(), vector_store),
            documents,
            chunks,
            embeddings,
        }
    }

    #[tokio::test]
    async fn test_create_indexes_document() {
        let fx = fixture();
        let content = "Assessment: stable angina.\n\n".repeat(80);

        let response = fx
            .use_case
            .execute(CreateDocumentRequest {
                title: "Cardiology consult".to_string(),
                content: content.clone(),
            })
            .await
            .unwrap();

        let expected = RecursiveCharacterSplitter::default().split_text(&content).len();
        assert_eq!(response.chunks_indexed, expected);
        assert_eq!(fx.chunks.len(), expected);
        assert_eq!(
            fx.documents.snapshot(response.document.id()),
            Some(response.document.clone())
        );
    }

    #[tokio::test]
    async fn test_indexing_failure_removes_row() {
        let fx = fixture();
        fx.embeddings.set_failing(true);

        let result = fx
            .use_case
            .execute(CreateDocumentRequest {
                title: "Discharge summary".to_string(),
                content: "Discharged home in stable condition.".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CreateDocumentError::IndexingError(_))));
        assert_eq!(fx.documents.len(), 0);
        assert!(fx.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let fx = fixture();

        let result = fx
            .use_case
            .execute(CreateDocumentRequest {
                title: "  ".to_string(),
                content: "text".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CreateDocumentError::ValidationError(_))));
        assert_eq!(fx.documents.len(), 0);
    }
}
