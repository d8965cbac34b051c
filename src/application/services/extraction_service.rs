use std::sync::Arc;

use serde::Serialize;

use crate::application::agents::{CodeIdentificationAgent, CodeLookupAgent, MedicalExtractionAgent};
use crate::application::ports::language_model::LanguageModel;
use crate::domain::entities::{CodeCandidates, CodeMappings, StructuredMedicalData};

#[derive(Debug)]
pub enum ExtractionError {
    ProviderError {
        stage: &'static str,
        message: String,
    },
    /// The stage's response could not be decoded. `raw` keeps the model text.
    MalformedOutput {
        stage: &'static str,
        message: String,
        raw: String,
    },
}

impl ExtractionError {
    pub fn stage(&self) -> &'static str {
        match self {
            ExtractionError::ProviderError { stage, .. } => *stage,
            ExtractionError::MalformedOutput { stage, .. } => *stage,
        }
    }
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::ProviderError { stage, message } => {
                write!(f, "Language model error during {}: {}", stage, message)
            }
            ExtractionError::MalformedOutput { stage, message, .. } => {
                write!(f, "Malformed model output during {}: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub structured_data: StructuredMedicalData,
    pub code_mappings: CodeMappings,
    pub raw_codes: CodeCandidates,
}

/// Runs code identification, code lookup and structured extraction in that
/// order, each stage feeding the next.
pub struct ExtractionService {
    code_identifier: CodeIdentificationAgent,
    code_lookup: CodeLookupAgent,
    medical_extractor: MedicalExtractionAgent,
}

impl ExtractionService {
    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self {
            code_identifier: CodeIdentificationAgent::new(language_model.clone()),
            code_lookup: CodeLookupAgent::new(language_model.clone()),
            medical_extractor: MedicalExtractionAgent::new(language_model),
        }
    }

    pub async fn extract_entities(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        let raw_codes = self.code_identifier.process(text).await?;
        tracing::info!(
            "Identified {} ICD and {} RxNorm candidate codes",
            raw_codes.icd_codes.len(),
            raw_codes.rxnorm_codes.len()
        );
        if raw_codes.is_empty() {
            tracing::warn!("No candidate codes identified in note");
        }

        let code_mappings = self.code_lookup.process(&raw_codes).await?;
        tracing::info!(
            "Validated {} of {} candidate codes",
            code_mappings.len(),
            raw_codes.len()
        );
        if code_mappings.is_empty() && !raw_codes.is_empty() {
            tracing::warn!("None of the candidate codes could be validated");
        }

        let structured_data = self
            .medical_extractor
            .process(text, &code_mappings)
            .await?;
        if structured_data.is_empty() {
            tracing::warn!("Extraction produced no structured clinical data");
        } else {
            tracing::info!(
                "Extracted {} clinical entries",
                structured_data.entry_count()
            );
        }

        Ok(ExtractionResult {
            structured_data,
            code_mappings,
            raw_codes,
        })
    }
}
