use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata attached to every indexed chunk. Caller supplied keys
/// (for example `title`) live next to the bookkeeping keys written by the
/// vector store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkMetadata {
    properties: Map<String, Value>,
}

impl ChunkMetadata {
    pub fn new() -> Self {
        Self {
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn set_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_string(), value);
    }

    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn set_title(&mut self, title: &str) {
        self.set_property("title", Value::String(title.to_string()));
    }

    pub fn get_title(&self) -> Option<&str> {
        self.get_property("title").and_then(|v| v.as_str())
    }

    pub fn get_document_id(&self) -> Option<i32> {
        self.get_property("document_id")
            .and_then(|v| v.as_i64())
            .map(|n| n as i32)
    }

    pub fn get_chunk_id(&self) -> Option<&str> {
        self.get_property("chunk_id").and_then(|v| v.as_str())
    }

    /// Copy of this metadata with the per-chunk bookkeeping keys filled in.
    pub fn for_chunk(
        &self,
        document_id: i32,
        chunk_index: i32,
        total_chunks: i32,
        chunk_id: &str,
    ) -> Self {
        let mut metadata = self.clone();
        metadata.set_property("document_id", Value::from(document_id));
        metadata.set_property("chunk_index", Value::from(chunk_index));
        metadata.set_property("total_chunks", Value::from(total_chunks));
        metadata.set_property("chunk_id", Value::String(chunk_id.to_string()));
        metadata
    }
}

impl From<Map<String, Value>> for ChunkMetadata {
    fn from(properties: Map<String, Value>) -> Self {
        Self { properties }
    }
}

impl From<ChunkMetadata> for Value {
    fn from(metadata: ChunkMetadata) -> Self {
        Value::Object(metadata.properties)
    }
}

impl TryFrom<Value> for ChunkMetadata {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(ChunkMetadata::from(map)),
            Value::Null => Ok(ChunkMetadata::new()),
            _ => Err("Chunk metadata must be a JSON object".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_for_chunk_keeps_caller_keys() {
        let mut base = ChunkMetadata::new();
        base.set_title("Cardiology note");

        let metadata = base.for_chunk(12, 1, 3, "12-chunk-1");

        assert_eq!(metadata.get_title(), Some("Cardiology note"));
        assert_eq!(metadata.get_document_id(), Some(12));
        assert_eq!(metadata.get_chunk_id(), Some("12-chunk-1"));
        assert_eq!(metadata.get_property("total_chunks"), Some(&json!(3)));
        assert!(base.get_chunk_id().is_none());
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        assert!(ChunkMetadata::try_from(json!([1, 2])).is_err());
        assert!(ChunkMetadata::try_from(Value::Null).unwrap().is_empty());
        assert_eq!(
            ChunkMetadata::try_from(json!({"title": "x"})).unwrap().len(),
            1
        );
    }
}
