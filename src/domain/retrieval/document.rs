use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document returned by a retriever.
///
/// Treated as an immutable value once retrieved. Serializes with the
/// `pageContent`/`metadata` field names clients expect on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    #[serde(rename = "pageContent")]
    pub page_content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RetrievedDocument {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
