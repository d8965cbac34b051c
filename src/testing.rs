//! In-memory stand-ins for the database and the model providers.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pgvector::Vector;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
use crate::application::ports::language_model::{
    CompletionRequest, CompletionResponse, LanguageModel, LanguageModelError,
};
use crate::domain::entities::{Document, DocumentChunk, NewDocument};
use crate::domain::repositories::ChunkRepository;
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::chunk_repository::{ChunkRepositoryError, ScoredChunk};
use crate::domain::repositories::document_repository::DocumentRepositoryError;

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<BTreeMap<i32, Document>>,
    last_id: AtomicI32,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, id: i32) -> Option<Document> {
        self.documents.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: &NewDocument) -> Result<Document, DocumentRepositoryError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let created = Document::new(
            id,
            document.title.clone(),
            document.content.clone(),
            now,
            now,
        );

        self.documents.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.snapshot(id))
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self.documents.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, document: &Document) -> Result<Document, DocumentRepositoryError> {
        let mut documents = self.documents.lock().unwrap();
        match documents.get_mut(&document.id()) {
            Some(stored) => {
                *stored = document.clone();
                Ok(document.clone())
            }
            None => Err(DocumentRepositoryError::NotFound(document.id())),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DocumentRepositoryError> {
        Ok(self.documents.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryChunkRepository {
    chunks: Mutex<Vec<DocumentChunk>>,
    fail_deletes: AtomicBool,
}

impl InMemoryChunkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing_deletes(&self, failing: bool) {
        self.fail_deletes.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contents_of(&self, document_id: i32) -> Vec<String> {
        let mut chunks: Vec<DocumentChunk> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.belongs_to_document(document_id))
            .cloned()
            .collect();
        chunks.sort_by_key(|c| c.chunk_index());
        chunks.into_iter().map(|c| c.content().to_string()).collect()
    }
}

fn l2_distance(a: &Vector, b: &Vector) -> f64 {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| ((x - y) as f64).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[async_trait]
impl ChunkRepository for InMemoryChunkRepository {
    async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
        let mut stored = self.chunks.lock().unwrap();
        for chunk in chunks {
            if stored.iter().any(|c| c.id() == chunk.id()) {
                return Err(ChunkRepositoryError::DatabaseError(format!(
                    "duplicate chunk id {}",
                    chunk.id()
                )));
            }
        }
        stored.extend(chunks.iter().cloned());
        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<DocumentChunk>, ChunkRepositoryError> {
        let mut chunks: Vec<DocumentChunk> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.belongs_to_document(document_id))
            .cloned()
            .collect();
        chunks.sort_by_key(|c| c.chunk_index());
        Ok(chunks)
    }

    async fn find_ids_by_document_id(
        &self,
        document_id: i32,
    ) -> Result<Vec<String>, ChunkRepositoryError> {
        Ok(self
            .find_by_document_id(document_id)
            .await?
            .iter()
            .map(|c| c.id().to_string())
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<i64, ChunkRepositoryError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ChunkRepositoryError::DatabaseError(
                "vector index unavailable".to_string(),
            ));
        }

        let mut stored = self.chunks.lock().unwrap();
        let before = stored.len();
        stored.retain(|c| !ids.iter().any(|id| id == c.id()));
        Ok((before - stored.len()) as i64)
    }

    async fn count_by_document_id(&self, document_id: i32) -> Result<i64, ChunkRepositoryError> {
        Ok(self.find_by_document_id(document_id).await?.len() as i64)
    }

    async fn similarity_search(
        &self,
        query_vector: &Vector,
        limit: i64,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .map(|chunk| ScoredChunk {
                distance: l2_distance(chunk.embedding(), query_vector),
                chunk: chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(limit.max(0) as usize);
        Ok(scored)
    }
}

/// Deterministic embeddings: a normalised letter histogram, so texts sharing
/// words land close together.
#[derive(Default)]
pub struct FakeEmbeddingProvider {
    failing: AtomicBool,
    batch_calls: AtomicUsize,
}

impl FakeEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn embed(text: &str) -> Vector {
        let mut counts = vec![0f32; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }

        let norm = counts.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            counts.iter_mut().for_each(|v| *v /= norm);
        }

        Vector::from(counts)
    }

    fn check(&self) -> Result<(), EmbeddingProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(EmbeddingProviderError::ServiceUnavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddingProvider {
    async fn embed_query(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        self.check()?;

        Ok(Self::embed(text))
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }

    fn model_info(&self) -> String {
        "fake-letter-histogram".to_string()
    }
}

/// Replays queued completions in order and records every request it saw.
#[derive(Default)]
pub struct ScriptedLanguageModel {
    responses: Mutex<VecDeque<Result<String, LanguageModelError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLanguageModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::default();
        for response in responses {
            model.push_response(response);
        }
        model
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: LanguageModelError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn generate_text(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError> {
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(CompletionResponse {
                text,
                model_name: self.model_info(),
                usage: None,
            }),
            Some(Err(e)) => Err(e),
            None => Err(LanguageModelError::ApiError(
                "no scripted response left".to_string(),
            )),
        }
    }

    fn model_info(&self) -> String {
        "scripted".to_string()
    }
}
