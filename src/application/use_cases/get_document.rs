use std::sync::Arc;

use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};

#[derive(Debug)]
pub enum GetDocumentError {
    DocumentNotFound(i32),
    RepositoryError(String),
}

impl std::fmt::Display for GetDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDocumentError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            GetDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetDocumentError {}

impl From<DocumentRepositoryError> for GetDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        match error {
            DocumentRepositoryError::NotFound(id) => GetDocumentError::DocumentNotFound(id),
            _ => GetDocumentError::RepositoryError(error.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetDocumentRequest {
    pub document_id: i32,
}

#[derive(Debug, Clone)]
pub struct GetDocumentResponse {
    pub document: Document,
}

pub struct GetDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
}

impl GetDocumentUseCase {
    pub fn new(document_repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            document_repository,
        }
    }

    pub async fn execute(
        &self,
        request: GetDocumentRequest,
    ) -> Result<GetDocumentResponse, GetDocumentError> {
        let document = self
            .document_repository
            .find_by_id(request.document_id)
            .await?
            .ok_or(GetDocumentError::DocumentNotFound(request.document_id))?;

        Ok(GetDocumentResponse { document })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewDocument;
    use crate::testing::InMemoryDocumentRepository;

    #[tokio::test]
    async fn test_get_document() {
        let repository = Arc::new(InMemoryDocumentRepository::new());
        let created = repository
            .create(&NewDocument::new("Note".to_string(), "Body".to_string()))
            .await
            .unwrap();
        let use_case = GetDocumentUseCase::new(repository);

        let response = use_case
            .execute(GetDocumentRequest {
                document_id: created.id(),
            })
            .await
            .unwrap();
        assert_eq!(response.document, created);

        let missing = use_case
            .execute(GetDocumentRequest { document_id: 999 })
            .await;
        assert!(matches!(missing, Err(GetDocumentError::DocumentNotFound(999))));
    }
}
