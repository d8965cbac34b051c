use diesel::prelude::*;
use pgvector::Vector;

use crate::domain::entities::DocumentChunk;
use crate::domain::value_objects::ChunkMetadata;
use crate::infrastructure::database::schema::document_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChunkModel {
    pub id: String,
    pub document_id: i32,
    pub content: String,
    pub chunk_index: i32,
    pub total_chunks: i32,
    pub metadata: serde_json::Value,
    pub embedding: Option<Vector>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentChunkModel {
    pub id: String,
    pub document_id: i32,
    pub content: String,
    pub chunk_index: i32,
    pub total_chunks: i32,
    pub metadata: serde_json::Value,
    pub embedding: Option<Vector>,
}

impl From<&DocumentChunk> for NewDocumentChunkModel {
    fn from(chunk: &DocumentChunk) -> Self {
        Self {
            id: chunk.id().to_string(),
            document_id: chunk.document_id(),
            content: chunk.content().to_string(),
            chunk_index: chunk.chunk_index(),
            total_chunks: chunk.total_chunks(),
            metadata: chunk.metadata().clone().into(),
            embedding: Some(chunk.embedding().clone()),
        }
    }
}

impl TryFrom<DocumentChunkModel> for DocumentChunk {
    type Error = String;

    fn try_from(model: DocumentChunkModel) -> Result<Self, Self::Error> {
        let embedding = model
            .embedding
            .ok_or_else(|| format!("Chunk {} has no embedding", model.id))?;
        let metadata = ChunkMetadata::try_from(model.metadata)?;

        Ok(DocumentChunk::from_parts(
            model.id,
            model.document_id,
            model.content,
            model.chunk_index,
            model.total_chunks,
            metadata,
            embedding,
        ))
    }
}
