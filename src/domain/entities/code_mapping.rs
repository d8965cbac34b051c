use serde::{Deserialize, Serialize};

use super::lenient;

/// Unvalidated codes proposed by the identification stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeCandidates {
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub icd_codes: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub rxnorm_codes: Vec<String>,
}

impl CodeCandidates {
    pub fn is_empty(&self) -> bool {
        self.icd_codes.is_empty() && self.rxnorm_codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.icd_codes.len() + self.rxnorm_codes.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IcdMapping {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RxNormMapping {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub form: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub strength: String,
}

/// Validated codes per coding system. The lookup stage may drop candidates
/// it cannot confirm, so this can be smaller than the `CodeCandidates` it
/// came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeMappings {
    #[serde(default, deserialize_with = "lenient::vec")]
    pub icd_mappings: Vec<IcdMapping>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub rxnorm_mappings: Vec<RxNormMapping>,
}

impl CodeMappings {
    pub fn is_empty(&self) -> bool {
        self.icd_mappings.is_empty() && self.rxnorm_mappings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.icd_mappings.len() + self.rxnorm_mappings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidates_drop_blank_codes() {
        let candidates: CodeCandidates = serde_json::from_value(json!({
            "icd_codes": ["E11.9", "", null],
            "rxnorm_codes": [860975]
        }))
        .unwrap();

        assert_eq!(candidates.icd_codes, vec!["E11.9"]);
        assert_eq!(candidates.rxnorm_codes, vec!["860975"]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_mappings_lookup() {
        let mappings: CodeMappings = serde_json::from_value(json!({
            "icd_mappings": [
                {"code": "E11.9", "description": "Type 2 diabetes mellitus without complications"}
            ]
        }))
        .unwrap();

        assert!(mappings.rxnorm_mappings.is_empty());
        assert_eq!(mappings.icd_mappings[0].code, "E11.9");
        assert_eq!(mappings.icd_mappings[0].category, "");
        assert_eq!(mappings.len(), 1);
    }
}
