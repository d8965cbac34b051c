use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::{Document, NewDocument};
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};
use crate::infrastructure::database::models::{DocumentChangeset, DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn create(&self, document: &NewDocument) -> Result<Document, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let model = diesel::insert_into(documents::table)
            .values(&NewDocumentModel::from(document))
            .returning(DocumentModel::as_returning())
            .get_result(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Document::from(model))
    }

    async fn find_by_id(&self, document_id: i32) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents::table
            .find(document_id)
            .select(DocumentModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents::table
            .order(documents::id.asc())
            .select(DocumentModel::as_select())
            .load(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn update(&self, document: &Document) -> Result<Document, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let model = diesel::update(documents::table.find(document.id()))
            .set(&DocumentChangeset::from(document))
            .returning(DocumentModel::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        model
            .map(Document::from)
            .ok_or(DocumentRepositoryError::NotFound(document.id()))
    }

    async fn delete(&self, document_id: i32) -> Result<bool, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(documents::table.find(document_id))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
