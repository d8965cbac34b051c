use async_trait::async_trait;
use diesel::prelude::*;
use pgvector::{Vector, VectorExpressionMethods};

use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{
    ChunkRepository,
    chunk_repository::{ChunkRepositoryError, ScoredChunk},
};
use crate::infrastructure::database::models::{DocumentChunkModel, NewDocumentChunkModel};
use crate::infrastructure::database::schema::document_chunks;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Chunk store backed by the `document_chunks` table and pgvector's L2
/// distance operator.
pub struct PgVectorChunkRepository {
    pool: DbPool,
}

impl PgVectorChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(models: Vec<DocumentChunkModel>) -> Result<Vec<DocumentChunk>, ChunkRepositoryError> {
    models
        .into_iter()
        .map(|model| DocumentChunk::try_from(model).map_err(ChunkRepositoryError::ValidationError))
        .collect()
}

#[async_trait]
impl ChunkRepository for PgVectorChunkRepository {
    async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let new_chunks: Vec<NewDocumentChunkModel> =
            chunks.iter().map(NewDocumentChunkModel::from).collect();

        diesel::insert_into(document_chunks::table)
            .values(&new_chunks)
            .execute(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<DocumentChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let models = document_chunks::table
            .filter(document_chunks::document_id.eq(document_id))
            .order(document_chunks::chunk_index.asc())
            .select(DocumentChunkModel::as_select())
            .load(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        to_domain(models)
    }

    async fn find_ids_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<String>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        document_chunks::table
            .filter(document_chunks::document_id.eq(document_id))
            .select(document_chunks::id)
            .load::<String>(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<i64, ChunkRepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count =
            diesel::delete(document_chunks::table.filter(document_chunks::id.eq_any(ids)))
                .execute(&mut conn)
                .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count as i64)
    }

    async fn count_by_document_id(&self, document_id: i32) -> Result<i64, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        document_chunks::table
            .filter(document_chunks::document_id.eq(document_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))
    }

    async fn similarity_search(
        &self,
        query_vector: &Vector,
        limit: i64,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let rows = document_chunks::table
            .filter(document_chunks::embedding.is_not_null())
            .select((
                DocumentChunkModel::as_select(),
                document_chunks::embedding.l2_distance(query_vector.clone()),
            ))
            .order(document_chunks::embedding.l2_distance(query_vector.clone()))
            .limit(limit)
            .load::<(DocumentChunkModel, Option<f64>)>(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|(model, distance)| {
                let chunk =
                    DocumentChunk::try_from(model).map_err(ChunkRepositoryError::ValidationError)?;
                Ok(ScoredChunk {
                    chunk,
                    distance: distance.unwrap_or(f64::MAX),
                })
            })
            .collect()
    }
}
