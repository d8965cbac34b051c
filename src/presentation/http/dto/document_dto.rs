use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::use_cases::get_document_chunks::GetDocumentChunksResponse;
use crate::domain::entities::{Document, DocumentChunk};

#[derive(Debug, Deserialize)]
pub struct CreateDocumentDto {
    pub title: String,
    pub content: String,
}

/// Absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentDto {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            title: document.title().to_string(),
            content: document.content().to_string(),
            created_at: document.created_at().to_rfc3339(),
            updated_at: document.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChunkResponseDto {
    pub id: String,
    pub content: String,
    pub chunk_index: i32,
    pub total_chunks: i32,
    pub metadata: Map<String, Value>,
}

impl From<DocumentChunk> for ChunkResponseDto {
    fn from(chunk: DocumentChunk) -> Self {
        Self {
            id: chunk.id().to_string(),
            content: chunk.content().to_string(),
            chunk_index: chunk.chunk_index(),
            total_chunks: chunk.total_chunks(),
            metadata: chunk.metadata().properties().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentChunksResponseDto {
    pub document_id: i32,
    pub total: i64,
    pub chunks: Vec<ChunkResponseDto>,
}

impl From<GetDocumentChunksResponse> for DocumentChunksResponseDto {
    fn from(response: GetDocumentChunksResponse) -> Self {
        Self {
            document_id: response.document_id,
            total: response.total_count,
            chunks: response
                .chunks
                .into_iter()
                .map(ChunkResponseDto::from)
                .collect(),
        }
    }
}
