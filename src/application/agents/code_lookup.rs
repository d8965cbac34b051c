use std::sync::Arc;

use crate::application::ports::language_model::LanguageModel;
use crate::application::services::extraction_service::ExtractionError;
use crate::domain::entities::{CodeCandidates, CodeMappings};

pub const SYSTEM_PROMPT: &str = "You are a medical coding specialist. Your task is to:
1. Look up and validate ICD-10 and RxNorm codes
2. Provide detailed descriptions for each valid code
3. Return comprehensive code mappings

Be precise and only return valid codes with accurate descriptions.";

/// Validates candidate codes and describes the ones it accepts. Codes the
/// model cannot confirm are dropped silently.
pub struct CodeLookupAgent {
    language_model: Arc<dyn LanguageModel>,
}

impl CodeLookupAgent {
    pub const STAGE: &'static str = "code_lookup";

    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    pub fn build_prompt(candidates: &CodeCandidates) -> String {
        let icd_codes = serde_json::to_string(&candidates.icd_codes).unwrap_or_default();
        let rxnorm_codes = serde_json::to_string(&candidates.rxnorm_codes).unwrap_or_default();

        format!(
            r#"Please validate and look up these medical codes:

ICD-10 Codes:
{icd_codes}

RxNorm Codes:
{rxnorm_codes}

For each code, provide:
1. The code itself
2. The official description
3. Any relevant additional information

Return the results in this JSON format:
{{
    "icd_mappings": [
        {{
            "code": "ICD-10 code",
            "description": "official description",
            "category": "disease category"
        }}
    ],
    "rxnorm_mappings": [
        {{
            "code": "RxNorm code",
            "description": "medication name",
            "form": "dosage form",
            "strength": "strength info"
        }}
    ]
}}"#
        )
    }

    pub async fn process(
        &self,
        candidates: &CodeCandidates,
    ) -> Result<CodeMappings, ExtractionError> {
        super::run_stage(
            self.language_model.as_ref(),
            Self::STAGE,
            SYSTEM_PROMPT,
            Self::build_prompt(candidates),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLanguageModel;

    #[test]
    fn test_prompt_lists_candidates() {
        let candidates = CodeCandidates {
            icd_codes: vec!["E11.9".to_string(), "I10".to_string()],
            rxnorm_codes: vec!["860975".to_string()],
        };

        let prompt = CodeLookupAgent::build_prompt(&candidates);

        assert!(prompt.contains(r#"["E11.9","I10"]"#));
        assert!(prompt.contains(r#"["860975"]"#));
    }

    #[tokio::test]
    async fn test_mappings_may_shrink() {
        let model = Arc::new(ScriptedLanguageModel::new([
            "```json\n{\"icd_mappings\": [{\"code\": \"E11.9\", \"description\": \"Type 2 diabetes mellitus without complications\", \"category\": \"Endocrine\"}], \"rxnorm_mappings\": []}\n```",
        ]));
        let agent = CodeLookupAgent::new(model);

        let candidates = CodeCandidates {
            icd_codes: vec!["E11.9".to_string(), "Z99.99".to_string()],
            rxnorm_codes: vec![],
        };
        let mappings = agent.process(&candidates).await.unwrap();

        assert_eq!(mappings.icd_mappings.len(), 1);
        assert!(mappings.len() < candidates.len());
        assert_eq!(mappings.icd_mappings[0].category, "Endocrine");
    }
}
