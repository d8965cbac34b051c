use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::language_model::{CompletionRequest, LanguageModel};
use crate::application::services::vector_store::{DEFAULT_SEARCH_K, VectorStoreService};
use crate::domain::entities::RetrievedChunk;

pub const MEDICAL_SYSTEM_PROMPT: &str = "You are a medical assistant which summarizes medical SOAP notes. The user will provide a question and context will be retrieved from a vector store. If the answer cannot be found in the context, say so.";

#[derive(Debug)]
pub enum QuestionAnsweringError {
    RetrievalError(String),
    LanguageModelError(String),
}

impl std::fmt::Display for QuestionAnsweringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionAnsweringError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
            QuestionAnsweringError::LanguageModelError(msg) => {
                write!(f, "Language model error: {}", msg)
            }
        }
    }
}

impl std::error::Error for QuestionAnsweringError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerContext {
    pub chunks: Vec<RetrievedChunk>,
    pub total_chunks_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub context: AnswerContext,
}

pub struct QuestionAnsweringService {
    vector_store: Arc<VectorStoreService>,
    language_model: Arc<dyn LanguageModel>,
}

impl QuestionAnsweringService {
    pub fn new(vector_store: Arc<VectorStoreService>, language_model: Arc<dyn LanguageModel>) -> Self {
        Self {
            vector_store,
            language_model,
        }
    }

    pub fn build_prompt(context: &str, question: &str) -> String {
        format!("Context:\n{context}\n\nQuestion: {question}\n\nAnswer:")
    }

    /// Answers from the closest indexed chunks. With an empty index the model
    /// is still asked, with an empty context.
    pub async fn answer_question(&self, question: &str) -> Result<Answer, QuestionAnsweringError> {
        let chunks = self
            .vector_store
            .search_similar_chunks(question, DEFAULT_SEARCH_K)
            .await
            .map_err(|e| QuestionAnsweringError::RetrievalError(e.to_string()))?;

        tracing::debug!("Retrieved {} chunks for question", chunks.len());

        let context = chunks
            .iter()
            .map(|chunk| chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let request = CompletionRequest::new(Self::build_prompt(&context, question))
            .with_system_prompt(MEDICAL_SYSTEM_PROMPT)
            .with_temperature(0.0)
            .with_max_tokens(1000);

        let response = self
            .language_model
            .generate_text(request)
            .await
            .map_err(|e| QuestionAnsweringError::LanguageModelError(e.to_string()))?;

        let total_chunks_used = chunks.len();

        Ok(Answer {
            answer: response.text,
            context: AnswerContext {
                chunks,
                total_chunks_used,
            },
        })
    }
}
