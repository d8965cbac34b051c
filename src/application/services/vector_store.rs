use std::sync::Arc;

use crate::application::ports::EmbeddingProvider;
use crate::application::services::text_splitter::TextSplitter;
use crate::domain::entities::{DocumentChunk, RetrievedChunk};
use crate::domain::repositories::ChunkRepository;
use crate::domain::value_objects::ChunkMetadata;

pub const EMBEDDING_BATCH_SIZE: usize = 16;
pub const DEFAULT_SEARCH_K: usize = 3;

#[derive(Debug)]
pub enum VectorStoreError {
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for VectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorStoreError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            VectorStoreError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for VectorStoreError {}

/// Chunk, embed, store, search and delete document text in the vector index.
pub struct VectorStoreService {
    chunk_repository: Arc<dyn ChunkRepository>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    text_splitter: Arc<dyn TextSplitter>,
}

impl VectorStoreService {
    pub fn new(
        chunk_repository: Arc<dyn ChunkRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        text_splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self {
            chunk_repository,
            embedding_provider,
            text_splitter,
        }
    }

    /// Splits `content`, embeds every chunk and stores them in one batch.
    ///
    /// Nothing is written unless all embeddings succeed. Returns the number of
    /// chunks stored; empty content stores nothing and makes no provider call.
    pub async fn process_document(
        &self,
        document_id: i32,
        content: &str,
        metadata: &ChunkMetadata,
    ) -> Result<usize, VectorStoreError> {
        let chunks = self.embed_chunks(document_id, content, metadata).await?;
        self.store_chunks(document_id, &chunks).await
    }

    /// Builds the document's chunk set without touching the repository.
    async fn embed_chunks(
        &self,
        document_id: i32,
        content: &str,
        metadata: &ChunkMetadata,
    ) -> Result<Vec<DocumentChunk>, VectorStoreError> {
        let texts = self.text_splitter.split_text(content);

        if texts.is_empty() {
            tracing::info!("Document {} has no indexable content", document_id);
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBEDDING_BATCH_SIZE) {
            let vectors = self
                .embedding_provider
                .embed_texts(batch)
                .await
                .map_err(|e| VectorStoreError::EmbeddingError(e.to_string()))?;

            if vectors.len() != batch.len() {
                return Err(VectorStoreError::EmbeddingError(format!(
                    "Expected {} embeddings, received {}",
                    batch.len(),
                    vectors.len()
                )));
            }

            embeddings.extend(vectors);
        }

        let total_chunks = texts.len() as i32;
        Ok(texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (text, embedding))| {
                DocumentChunk::new(
                    document_id,
                    text,
                    index as i32,
                    total_chunks,
                    metadata,
                    embedding,
                )
            })
            .collect())
    }

    async fn store_chunks(
        &self,
        document_id: i32,
        chunks: &[DocumentChunk],
    ) -> Result<usize, VectorStoreError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        self.chunk_repository
            .save_batch(chunks)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))?;

        tracing::info!(
            "Indexed document {} into {} chunks",
            document_id,
            chunks.len()
        );

        Ok(chunks.len())
    }

    /// Removes every chunk tagged with `document_id`. Returns how many went.
    pub async fn delete_document(&self, document_id: i32) -> Result<usize, VectorStoreError> {
        let ids = self
            .chunk_repository
            .find_ids_by_document_id(document_id)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))?;

        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self
            .chunk_repository
            .delete_by_ids(&ids)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))?;

        tracing::info!("Deleted {} chunks of document {}", deleted, document_id);

        Ok(deleted as usize)
    }

    /// Indexes `content` in place of the document's current chunks.
    ///
    /// The new chunk set is embedded before anything is deleted, so an
    /// embedding failure leaves the existing chunks untouched.
    pub async fn replace_document(
        &self,
        document_id: i32,
        content: &str,
        metadata: &ChunkMetadata,
    ) -> Result<usize, VectorStoreError> {
        let chunks = self.embed_chunks(document_id, content, metadata).await?;
        self.delete_document(document_id).await?;
        self.store_chunks(document_id, &chunks).await
    }

    /// At most `k` chunks closest to `query`, best match first.
    pub async fn search_similar_chunks(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorStoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedding_provider
            .embed_query(query)
            .await
            .map_err(|e| VectorStoreError::EmbeddingError(e.to_string()))?;

        let results = self
            .chunk_repository
            .similarity_search(&query_vector, k as i64)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))?;

        Ok(results
            .into_iter()
            .take(k)
            .map(|scored| RetrievedChunk::from_chunk(scored.chunk, scored.distance))
            .collect())
    }

    pub async fn count_chunks(&self, document_id: i32) -> Result<i64, VectorStoreError> {
        self.chunk_repository
            .count_by_document_id(document_id)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))
    }

    /// The document's chunks ordered by chunk index.
    pub async fn list_chunks(&self, document_id: i32) -> Result<Vec<DocumentChunk>, VectorStoreError> {
        self.chunk_repository
            .find_by_document_id(document_id)
            .await
            .map_err(|e| VectorStoreError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::text_splitter::RecursiveCharacterSplitter;
    use crate::testing::{FakeEmbeddingProvider, InMemoryChunkRepository};

    fn service(
        chunks: Arc<InMemoryChunkRepository>,
        embeddings: Arc<FakeEmbeddingProvider>,
    ) -> VectorStoreService {
        VectorStoreService::new(
            chunks,
            embeddings,
            Arc::new(RecursiveCharacterSplitter::default()),
        )
    }

    fn long_note() -> String {
        (0..60)
            .map(|i| format!("Visit {} notes: patient reports stable glucose readings.", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_process_document_stores_all_chunks() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        let content = long_note();
        let expected = RecursiveCharacterSplitter::default().split_text(&content).len();
        assert!(expected > 1);

        let metadata = ChunkMetadata::new().with_property("title", "Follow-up".into());
        let stored = store.process_document(5, &content, &metadata).await.unwrap();

        assert_eq!(stored, expected);
        assert_eq!(store.count_chunks(5).await.unwrap(), expected as i64);

        let listed = store.list_chunks(5).await.unwrap();
        assert_eq!(listed[0].id(), "5-chunk-0");
        assert_eq!(listed[0].metadata().get_title(), Some("Follow-up"));
        assert_eq!(listed[0].metadata().get_document_id(), Some(5));
        assert_eq!(listed.last().unwrap().total_chunks(), expected as i32);
    }

    #[tokio::test]
    async fn test_embeddings_are_requested_in_batches() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        let content = "x".repeat(800 * 20);
        let stored = store
            .process_document(1, &content, &ChunkMetadata::new())
            .await
            .unwrap();

        assert!(stored > EMBEDDING_BATCH_SIZE);
        assert_eq!(
            embeddings.batch_calls(),
            stored.div_ceil(EMBEDDING_BATCH_SIZE)
        );
    }

    #[tokio::test]
    async fn test_empty_content_makes_no_provider_call() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        let stored = store
            .process_document(3, "   ", &ChunkMetadata::new())
            .await
            .unwrap();

        assert_eq!(stored, 0);
        assert_eq!(embeddings.batch_calls(), 0);
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_stores_nothing() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        embeddings.set_failing(true);
        let store = service(chunks.clone(), embeddings.clone());

        let result = store
            .process_document(9, &long_note(), &ChunkMetadata::new())
            .await;

        assert!(matches!(result, Err(VectorStoreError::EmbeddingError(_))));
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_document_removes_chunks_from_search() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        store
            .process_document(1, "Metformin lowers blood glucose.", &ChunkMetadata::new())
            .await
            .unwrap();
        store
            .process_document(2, "Lisinopril treats hypertension.", &ChunkMetadata::new())
            .await
            .unwrap();

        assert_eq!(store.delete_document(1).await.unwrap(), 1);
        assert_eq!(store.delete_document(1).await.unwrap(), 0);

        let results = store.search_similar_chunks("Metformin", 3).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|r| r.metadata.get_document_id() == Some(2)));
    }

    #[tokio::test]
    async fn test_search_is_bounded_and_ordered() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        let notes = [
            "Type 2 diabetes managed with metformin.",
            "Hypertension controlled with lisinopril.",
            "Asthma treated with albuterol inhaler.",
            "Diabetes follow-up, metformin dose unchanged.",
            "Seasonal allergies, loratadine as needed.",
        ];
        for (i, note) in notes.iter().enumerate() {
            store
                .process_document(i as i32 + 1, note, &ChunkMetadata::new())
                .await
                .unwrap();
        }

        let results = store
            .search_similar_chunks("diabetes metformin", DEFAULT_SEARCH_K)
            .await
            .unwrap();

        assert_eq!(results.len(), DEFAULT_SEARCH_K);
        for pair in results.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }

        assert!(store.search_similar_chunks("anything", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_document_swaps_chunk_set() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        store
            .process_document(4, &long_note(), &ChunkMetadata::new())
            .await
            .unwrap();
        let stored = store
            .replace_document(4, "Short replacement note.", &ChunkMetadata::new())
            .await
            .unwrap();

        assert_eq!(stored, 1);
        let listed = store.list_chunks(4).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content(), "Short replacement note.");
    }

    #[tokio::test]
    async fn test_replace_keeps_old_chunks_when_embedding_fails() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let embeddings = Arc::new(FakeEmbeddingProvider::new());
        let store = service(chunks.clone(), embeddings.clone());

        store
            .process_document(4, "Original assessment.", &ChunkMetadata::new())
            .await
            .unwrap();
        embeddings.set_failing(true);

        let result = store
            .replace_document(4, "Revised assessment.", &ChunkMetadata::new())
            .await;

        assert!(matches!(result, Err(VectorStoreError::EmbeddingError(_))));
        assert_eq!(chunks.contents_of(4), vec!["Original assessment."]);
    }
}
