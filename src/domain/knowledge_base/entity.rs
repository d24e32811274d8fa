use serde::{Deserialize, Serialize};

/// A registered knowledge base backing RAG-mode chats.
///
/// Immutable for the duration of a request. The `embedding` field names the
/// embedding model its collection was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: i64,
    pub name: String,
    pub embedding: String,
}

impl KnowledgeBase {
    pub fn new(id: i64, name: impl Into<String>, embedding: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            embedding: embedding.into(),
        }
    }

    /// Name of the vector store collection holding this knowledge base's
    /// documents. Derived deterministically from the id.
    pub fn collection_name(&self) -> String {
        format!("collection_{}", self.id)
    }
}
