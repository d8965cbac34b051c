pub mod create_document;
pub mod delete_document;
pub mod get_document;
pub mod get_document_chunks;
pub mod list_documents;
pub mod reindex_documents;
pub mod update_document;

pub use create_document::CreateDocumentUseCase;
pub use delete_document::DeleteDocumentUseCase;
pub use get_document::GetDocumentUseCase;
pub use get_document_chunks::GetDocumentChunksUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use reindex_documents::ReindexDocumentsUseCase;
pub use update_document::UpdateDocumentUseCase;
