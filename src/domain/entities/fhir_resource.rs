use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A generated FHIR resource. The body is whatever JSON object the model
/// produced; only `resourceType` and `id` are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirResource(Map<String, Value>);

impl FhirResource {
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err("Response is not a JSON object".to_string()),
        }
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.0.get("resourceType").and_then(|v| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.0
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|id| !id.trim().is_empty())
    }

    /// Assigns a fresh UUID when the resource has no usable id.
    pub fn ensure_id(&mut self) -> &str {
        if self.id().is_none() {
            self.0
                .insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        self.0.get("id").and_then(|v| v.as_str()).unwrap_or_default()
    }
}

impl From<FhirResource> for Value {
    fn from(resource: FhirResource) -> Self {
        Value::Object(resource.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(FhirResource::from_value(json!(["Patient"])).is_err());
        assert!(FhirResource::from_value(json!("Patient")).is_err());

        let resource = FhirResource::from_value(json!({"resourceType": "Patient"})).unwrap();
        assert_eq!(resource.resource_type(), Some("Patient"));
        assert_eq!(resource.id(), None);
    }

    #[test]
    fn test_ensure_id_generates_when_missing_or_blank() {
        let mut missing = FhirResource::from_value(json!({"resourceType": "Condition"})).unwrap();
        let generated = missing.ensure_id().to_string();
        assert!(Uuid::parse_str(&generated).is_ok());

        let mut blank =
            FhirResource::from_value(json!({"resourceType": "Condition", "id": " "})).unwrap();
        assert_ne!(blank.ensure_id().trim(), "");
    }

    #[test]
    fn test_ensure_id_keeps_existing() {
        let mut resource =
            FhirResource::from_value(json!({"resourceType": "Patient", "id": "patient-1"}))
                .unwrap();

        assert_eq!(resource.ensure_id(), "patient-1");
    }
}
