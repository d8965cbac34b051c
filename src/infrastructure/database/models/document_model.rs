use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{Document, NewDocument};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub title: String,
    pub content: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChangeset {
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&NewDocument> for NewDocumentModel {
    fn from(document: &NewDocument) -> Self {
        Self {
            title: document.title.clone(),
            content: document.content.clone(),
        }
    }
}

impl From<&Document> for DocumentChangeset {
    fn from(document: &Document) -> Self {
        Self {
            title: document.title().to_string(),
            content: document.content().to_string(),
            updated_at: document.updated_at(),
        }
    }
}

impl From<DocumentModel> for Document {
    fn from(model: DocumentModel) -> Self {
        Document::new(
            model.id,
            model.title,
            model.content,
            model.created_at,
            model.updated_at,
        )
    }
}
