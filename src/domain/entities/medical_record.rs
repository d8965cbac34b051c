use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(default, deserialize_with = "lenient::string_map")]
    pub demographics: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub medical_history: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub severity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icd_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dosage: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub frequency: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub route: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub rxnorm_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub procedure: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub observation_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub interpretation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanAction {
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub due_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
}

/// The clinical record produced by the extraction pipeline. All six
/// top-level fields are always present; list order follows the model output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredMedicalData {
    #[serde(default, deserialize_with = "lenient::object")]
    pub patient_info: PatientInfo,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub treatments: Vec<Treatment>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub observations: Vec<Observation>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub plan: Vec<PlanAction>,
}

impl StructuredMedicalData {
    pub fn is_empty(&self) -> bool {
        self.patient_info.demographics.is_empty()
            && self.patient_info.medical_history.is_empty()
            && self.conditions.is_empty()
            && self.medications.is_empty()
            && self.treatments.is_empty()
            && self.observations.is_empty()
            && self.plan.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.conditions.len()
            + self.medications.len()
            + self.treatments.len()
            + self.observations.len()
            + self.plan.len()
    }
}
