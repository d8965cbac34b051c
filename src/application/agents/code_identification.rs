use std::sync::Arc;

use crate::application::ports::language_model::LanguageModel;
use crate::application::services::extraction_service::ExtractionError;
use crate::domain::entities::CodeCandidates;

pub const SYSTEM_PROMPT: &str = "You are a medical code identification specialist. Your task is to:
1. Analyze the medical text and identify potential medical codes
2. Separate codes into ICD-10 codes and RxNorm codes
3. Return only the identified codes in separate arrays

Be thorough in identifying potential codes but do not validate them yet.";

/// Proposes candidate ICD-10 and RxNorm codes for a clinical text.
pub struct CodeIdentificationAgent {
    language_model: Arc<dyn LanguageModel>,
}

impl CodeIdentificationAgent {
    pub const STAGE: &'static str = "code_identification";

    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    pub fn build_prompt(text: &str) -> String {
        format!(
            r#"Please analyze this medical text and identify potential medical codes:

Text:
{text}

For each medical concept mentioned (conditions, medications, procedures, etc.), identify potential:
1. ICD-10 codes for diagnoses and conditions
2. RxNorm codes for medications

Return ONLY the codes in this JSON format:
{{
    "icd_codes": ["list of potential ICD-10 codes"],
    "rxnorm_codes": ["list of potential RxNorm codes"]
}}"#
        )
    }

    pub async fn process(&self, text: &str) -> Result<CodeCandidates, ExtractionError> {
        super::run_stage(
            self.language_model.as_ref(),
            Self::STAGE,
            SYSTEM_PROMPT,
            Self::build_prompt(text),
        )
        .await
    }
}
