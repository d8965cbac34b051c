use pgvector::Vector;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChunkMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    id: String,
    document_id: i32,
    content: String,
    chunk_index: i32,
    total_chunks: i32,
    metadata: ChunkMetadata,
    embedding: Vector,
}

impl DocumentChunk {
    pub fn new(
        document_id: i32,
        content: String,
        chunk_index: i32,
        total_chunks: i32,
        metadata: &ChunkMetadata,
        embedding: Vector,
    ) -> Self {
        let id = Self::chunk_id(document_id, chunk_index);
        let metadata = metadata.for_chunk(document_id, chunk_index, total_chunks, &id);

        Self {
            id,
            document_id,
            content,
            chunk_index,
            total_chunks,
            metadata,
            embedding,
        }
    }

    /// Rebuilds a chunk exactly as it was stored.
    pub fn from_parts(
        id: String,
        document_id: i32,
        content: String,
        chunk_index: i32,
        total_chunks: i32,
        metadata: ChunkMetadata,
        embedding: Vector,
    ) -> Self {
        Self {
            id,
            document_id,
            content,
            chunk_index,
            total_chunks,
            metadata,
            embedding,
        }
    }

    /// Deterministic chunk key: `{document_id}-chunk-{index}`.
    pub fn chunk_id(document_id: i32, chunk_index: i32) -> String {
        format!("{}-chunk-{}", document_id, chunk_index)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_id(&self) -> i32 {
        self.document_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn total_chunks(&self) -> i32 {
        self.total_chunks
    }

    pub fn metadata(&self) -> &ChunkMetadata {
        &self.metadata
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }

    pub fn belongs_to_document(&self, document_id: i32) -> bool {
        self.document_id == document_id
    }
}

/// A chunk returned by similarity search. `score` is the vector distance to
/// the query, so lower means closer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
    pub score: f64,
}

impl RetrievedChunk {
    pub fn from_chunk(chunk: DocumentChunk, score: f64) -> Self {
        Self {
            content: chunk.content,
            metadata: chunk.metadata,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_format() {
        assert_eq!(DocumentChunk::chunk_id(42, 0), "42-chunk-0");
        assert_eq!(DocumentChunk::chunk_id(42, 11), "42-chunk-11");
    }

    #[test]
    fn test_new_chunk_tags_metadata() {
        let mut metadata = ChunkMetadata::new();
        metadata.set_title("Lab report");

        let chunk = DocumentChunk::new(
            5,
            "HbA1c 7.2%".to_string(),
            2,
            4,
            &metadata,
            Vector::from(vec![0.1, 0.2]),
        );

        assert_eq!(chunk.id(), "5-chunk-2");
        assert!(chunk.belongs_to_document(5));
        assert_eq!(chunk.metadata().get_document_id(), Some(5));
        assert_eq!(chunk.metadata().get_chunk_id(), Some("5-chunk-2"));
        assert_eq!(chunk.metadata().get_title(), Some("Lab report"));
    }

    #[test]
    fn test_retrieved_chunk_keeps_content_and_score() {
        let chunk = DocumentChunk::new(
            1,
            "text".to_string(),
            0,
            1,
            &ChunkMetadata::new(),
            Vector::from(vec![1.0]),
        );

        let retrieved = RetrievedChunk::from_chunk(chunk, 0.25);
        assert_eq!(retrieved.content, "text");
        assert_eq!(retrieved.score, 0.25);
        assert_eq!(retrieved.metadata.get_chunk_id(), Some("1-chunk-0"));
    }
}
