use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::language_model::{CompletionRequest, LanguageModel};

const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 500;

#[derive(Debug)]
pub enum SummarizationError {
    InvalidInput(String),
    LanguageModelError(String),
}

impl std::fmt::Display for SummarizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SummarizationError::LanguageModelError(msg) => {
                write!(f, "Failed to process medical note: {}", msg)
            }
        }
    }
}

impl std::error::Error for SummarizationError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSummary {
    pub summary: String,
    pub processed_successfully: bool,
    pub error: Option<String>,
}

pub struct SummarizationService {
    language_model: Arc<dyn LanguageModel>,
}

impl SummarizationService {
    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    pub fn build_prompt(note_text: &str) -> String {
        format!(
            "You are a medical professional assistant. Please summarize the following medical note,
extracting key patient information including:
- Demographics
- Medical history
- Current symptoms
- Diagnosis
- Treatment plan

Medical Note:
{note_text}

Format your response as a concise professional summary."
        )
    }

    pub async fn summarize_note(&self, note_text: &str) -> Result<NoteSummary, SummarizationError> {
        if note_text.trim().is_empty() {
            return Err(SummarizationError::InvalidInput(
                "note_text must not be empty".to_string(),
            ));
        }

        let request = CompletionRequest::new(Self::build_prompt(note_text))
            .with_temperature(SUMMARY_TEMPERATURE)
            .with_max_tokens(SUMMARY_MAX_TOKENS);

        let response = self
            .language_model
            .generate_text(request)
            .await
            .map_err(|e| SummarizationError::LanguageModelError(e.to_string()))?;

        Ok(NoteSummary {
            summary: response.text,
            processed_successfully: true,
            error: None,
        })
    }
}
