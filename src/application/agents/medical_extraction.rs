use std::sync::Arc;

use crate::application::ports::language_model::LanguageModel;
use crate::application::services::extraction_service::ExtractionError;
use crate::domain::entities::{CodeMappings, StructuredMedicalData};

pub const SYSTEM_PROMPT: &str = "You are a medical information extraction specialist. Your task is to:
1. Extract detailed medical information from the text
2. Enrich the information with provided code mappings
3. Create a comprehensive structured output
4. Include all relevant medical details and relationships

Be thorough and maintain accuracy in the extracted information.

IMPORTANT: Your response must be a valid JSON object matching the specified format exactly.";

const OUTPUT_FORMAT: &str = r#"{
    "patient_info": {
        "demographics": {"age": "", "gender": "", "other_relevant_info": ""},
        "medical_history": []
    },
    "conditions": [
        {
            "name": "condition name",
            "status": "status",
            "severity": "severity",
            "icd_code": "matched ICD code",
            "description": "from code mapping"
        }
    ],
    "medications": [
        {
            "name": "medication name",
            "dosage": "dosage",
            "frequency": "frequency",
            "route": "route",
            "rxnorm_code": "matched RxNorm code",
            "details": "from code mapping"
        }
    ],
    "treatments": [
        {
            "procedure": "procedure name",
            "status": "status",
            "date": "date"
        }
    ],
    "observations": [
        {
            "type": "observation type",
            "value": "value",
            "unit": "unit",
            "date": "date",
            "interpretation": "interpretation"
        }
    ],
    "plan": [
        {
            "action": "planned action",
            "due_date": "due date",
            "status": "status",
            "details": "additional details"
        }
    ]
}"#;

/// Builds the structured record from the text, enriched with the validated
/// code mappings.
pub struct MedicalExtractionAgent {
    language_model: Arc<dyn LanguageModel>,
}

impl MedicalExtractionAgent {
    pub const STAGE: &'static str = "medical_extraction";

    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    pub fn build_prompt(text: &str, code_mappings: &CodeMappings) -> String {
        let mappings = serde_json::to_string_pretty(code_mappings).unwrap_or_default();

        format!(
            "Please analyze this medical text and create a structured representation:

Text:
{text}

Available Code Mappings:
{mappings}

Extract and structure the following information:
1. Patient Information
2. Conditions and Diagnoses (with ICD codes)
3. Medications (with RxNorm codes)
4. Treatments and Procedures
5. Vital Signs and Lab Results
6. Plan Actions and Follow-ups

Return ONLY a valid JSON object in this exact format:
{OUTPUT_FORMAT}"
        )
    }

    pub async fn process(
        &self,
        text: &str,
        code_mappings: &CodeMappings,
    ) -> Result<StructuredMedicalData, ExtractionError> {
        tracing::debug!("Sending extraction prompt to language model");

        super::run_stage(
            self.language_model.as_ref(),
            Self::STAGE,
            SYSTEM_PROMPT,
            Self::build_prompt(text, code_mappings),
        )
        .await
    }
}
