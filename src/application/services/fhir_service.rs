use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::application::ports::language_model::{CompletionRequest, LanguageModel};
use crate::application::services::model_output;
use crate::domain::entities::{FhirResource, StructuredMedicalData};

const DETERMINE_SYSTEM_PROMPT: &str = "You are a FHIR expert. Return only the resource types as a comma-separated list without any additional text or explanation.";
const DETERMINE_MAX_TOKENS: u32 = 100;
const GENERATE_MAX_TOKENS: u32 = 1000;

#[derive(Debug)]
pub enum FhirConversionError {
    ProviderError(String),
    InvalidResource {
        resource_type: String,
        reason: String,
    },
    NoResourcesGenerated,
}

impl std::fmt::Display for FhirConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FhirConversionError::ProviderError(msg) => write!(f, "Language model error: {}", msg),
            FhirConversionError::InvalidResource {
                resource_type,
                reason,
            } => write!(
                f,
                "Failed to generate valid {} resource: {}",
                resource_type, reason
            ),
            FhirConversionError::NoResourcesGenerated => {
                write!(f, "Failed to generate any valid FHIR resources")
            }
        }
    }
}

impl std::error::Error for FhirConversionError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FhirConversion {
    pub resources: Vec<FhirResource>,
    /// Types that produced a resource, in the order they were generated.
    pub resource_types: Vec<String>,
}

pub struct FhirService {
    language_model: Arc<dyn LanguageModel>,
}

impl FhirService {
    pub fn new(language_model: Arc<dyn LanguageModel>) -> Self {
        Self { language_model }
    }

    fn render_data(data: &StructuredMedicalData) -> String {
        serde_json::to_string_pretty(data).unwrap_or_default()
    }

    /// Asks the model which resource types represent `data` best.
    pub async fn determine_fhir_resources(
        &self,
        data: &StructuredMedicalData,
    ) -> Result<Vec<String>, FhirConversionError> {
        let prompt = format!(
            "Given this medical data, determine which FHIR resources would best represent it.
Focus on Patient, Condition, and MedicationStatement resources.
Only return the resource types as a comma-separated list.

Data: {}",
            Self::render_data(data)
        );

        let request = CompletionRequest::new(prompt)
            .with_system_prompt(DETERMINE_SYSTEM_PROMPT)
            .with_temperature(0.0)
            .with_max_tokens(DETERMINE_MAX_TOKENS);

        let response = self
            .language_model
            .generate_text(request)
            .await
            .map_err(|e| FhirConversionError::ProviderError(e.to_string()))?;

        Ok(parse_resource_types(&response.text))
    }

    /// Generates one resource of `resource_type` and checks it is a JSON
    /// object declaring that type.
    pub async fn generate_fhir_json(
        &self,
        data: &StructuredMedicalData,
        resource_type: &str,
    ) -> Result<FhirResource, FhirConversionError> {
        let system_prompt = format!(
            "You are a FHIR expert. Generate only valid FHIR JSON for a {resource_type} resource.
The response must:
1. Start with {{
2. End with }}
3. Be valid JSON
4. Follow FHIR R4 specification
5. Include only the JSON, no explanation or other text"
        );

        let prompt = format!(
            "Convert this medical data into a valid FHIR {resource_type} resource.
Follow these rules:
1. Include only relevant fields from the data
2. Use proper FHIR formatting and required fields
3. Generate valid JSON that matches the FHIR R4 spec
4. For references, use placeholder IDs
5. Include proper coding systems (SNOMED, ICD, RxNorm) where applicable
6. Ensure all JSON is properly formatted with correct brackets and commas

Data: {}",
            Self::render_data(data)
        );

        let request = CompletionRequest::new(prompt)
            .with_system_prompt(system_prompt)
            .with_temperature(0.0)
            .with_max_tokens(GENERATE_MAX_TOKENS);

        let response = self
            .language_model
            .generate_text(request)
            .await
            .map_err(|e| FhirConversionError::ProviderError(e.to_string()))?;

        let invalid = |reason: String| {
            tracing::error!("Error generating {} resource: {}", resource_type, reason);
            tracing::error!("Raw response: {}", response.text);
            FhirConversionError::InvalidResource {
                resource_type: resource_type.to_string(),
                reason,
            }
        };

        let json = model_output::extract_json_object(&response.text).ok_or_else(|| {
            invalid(format!("No valid JSON found in response for {}", resource_type))
        })?;

        let value: Value = serde_json::from_str(json)
            .map_err(|e| invalid(format!("Invalid JSON format: {}", e)))?;

        let resource = FhirResource::from_value(value).map_err(invalid)?;

        match resource.resource_type() {
            None => Err(invalid("Missing resourceType in FHIR resource".to_string())),
            Some(actual) if actual != resource_type => Err(invalid(format!(
                "Wrong resourceType: expected {}, got {}",
                resource_type, actual
            ))),
            Some(_) => Ok(resource),
        }
    }

    /// Generates every resource type the model picks. A type that fails is
    /// logged and skipped; the call only fails when none succeed.
    pub async fn convert_to_fhir(
        &self,
        data: &StructuredMedicalData,
    ) -> Result<FhirConversion, FhirConversionError> {
        let resource_types = self.determine_fhir_resources(data).await?;
        tracing::info!("Generating FHIR resources: {}", resource_types.join(", "));

        let mut resources = Vec::new();
        let mut successful_types = Vec::new();

        for resource_type in resource_types {
            match self.generate_fhir_json(data, &resource_type).await {
                Ok(mut resource) => {
                    resource.ensure_id();
                    resources.push(resource);
                    successful_types.push(resource_type);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", resource_type, e);
                }
            }
        }

        if resources.is_empty() {
            return Err(FhirConversionError::NoResourcesGenerated);
        }

        Ok(FhirConversion {
            resources,
            resource_types: successful_types,
        })
    }
}

fn parse_resource_types(text: &str) -> Vec<String> {
    text.trim()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
