pub mod pgvector_chunk_repository;
pub mod postgres_document_repository;

pub use pgvector_chunk_repository::PgVectorChunkRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
