use async_trait::async_trait;
use pgvector::Vector;

use crate::domain::entities::DocumentChunk;

#[derive(Debug)]
pub enum ChunkRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChunkRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkRepositoryError {}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub distance: f64,
}

/// Vector index of document chunks. Chunks are tagged with their document id
/// so a document's whole chunk set can be found and removed in one go.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError>;
    async fn find_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<DocumentChunk>, ChunkRepositoryError>;
    async fn find_ids_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<String>, ChunkRepositoryError>;
    async fn delete_by_ids(&self, ids: &[String]) -> Result<i64, ChunkRepositoryError>;
    async fn count_by_document_id(&self, document_id: i32) -> Result<i64, ChunkRepositoryError>;
    /// Nearest chunks to `query_vector`, closest first.
    async fn similarity_search(
        &self,
        query_vector: &Vector,
        limit: i64,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError>;
}
