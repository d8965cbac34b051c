pub mod code_identification;
pub mod code_lookup;
pub mod medical_extraction;

pub use code_identification::CodeIdentificationAgent;
pub use code_lookup::CodeLookupAgent;
pub use medical_extraction::MedicalExtractionAgent;

use serde::de::DeserializeOwned;

use crate::application::ports::language_model::{CompletionRequest, LanguageModel};
use crate::application::services::extraction_service::ExtractionError;
use crate::application::services::model_output;

/// Every agent runs deterministically.
pub const AGENT_TEMPERATURE: f32 = 0.0;

/// One prompt/response exchange followed by a mandatory JSON parse.
async fn run_stage<T: DeserializeOwned>(
    language_model: &dyn LanguageModel,
    stage: &'static str,
    system_prompt: &str,
    prompt: String,
) -> Result<T, ExtractionError> {
    let request = CompletionRequest::new(prompt)
        .with_system_prompt(system_prompt)
        .with_temperature(AGENT_TEMPERATURE);

    let response = language_model
        .generate_text(request)
        .await
        .map_err(|e| ExtractionError::ProviderError {
            stage,
            message: e.to_string(),
        })?;

    if response.text.trim().is_empty() {
        tracing::error!("{} stage returned an empty response", stage);
        return Err(ExtractionError::MalformedOutput {
            stage,
            message: "Empty response from language model".to_string(),
            raw: response.text,
        });
    }

    model_output::parse_json(&response.text).map_err(|e| {
        tracing::error!("{} stage returned malformed JSON: {}", stage, e);
        tracing::error!("Raw response: {}", response.text);
        ExtractionError::MalformedOutput {
            stage,
            message: e.to_string(),
            raw: response.text.clone(),
        }
    })
}
