use async_trait::async_trait;

use crate::domain::entities::{Document, NewDocument};

#[derive(Debug)]
pub enum DocumentRepositoryError {
    NotFound(i32),
    DatabaseError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &NewDocument) -> Result<Document, DocumentRepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Document>, DocumentRepositoryError>;
    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError>;
    /// Writes title, content and updated_at of an existing row.
    async fn update(&self, document: &Document) -> Result<Document, DocumentRepositoryError>;
    async fn delete(&self, id: i32) -> Result<bool, DocumentRepositoryError>;
}
