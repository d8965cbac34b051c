use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: i32,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A document that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
}

impl NewDocument {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }
}

impl Document {
    pub fn new(
        id: i32,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update. Fields left as `None` keep their value.
    /// Returns whether anything changed.
    pub fn apply_update(&mut self, title: Option<String>, content: Option<String>) -> bool {
        let mut changed = false;

        if let Some(title) = title {
            changed |= title != self.title;
            self.title = title;
        }
        if let Some(content) = content {
            changed |= content != self.content;
            self.content = content;
        }

        if changed {
            self.updated_at = Utc::now();
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let now = Utc::now();
        Document::new(
            7,
            "Discharge summary".to_string(),
            "Patient stable.".to_string(),
            now,
            now,
        )
    }

    #[test]
    fn test_partial_update_keeps_missing_fields() {
        let mut document = sample();

        assert!(document.apply_update(Some("Follow-up".to_string()), None));
        assert_eq!(document.title(), "Follow-up");
        assert_eq!(document.content(), "Patient stable.");
    }

    #[test]
    fn test_update_with_same_values_is_not_a_change() {
        let mut document = sample();
        let before = document.updated_at();

        assert!(!document.apply_update(
            Some("Discharge summary".to_string()),
            Some("Patient stable.".to_string())
        ));
        assert_eq!(document.updated_at(), before);
    }
}
