use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{DomainError, KnowledgeBase, KnowledgeBaseRepository};

/// In-memory knowledge base registry, seeded from configuration at startup.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeBaseRepository {
    entries: RwLock<HashMap<i64, KnowledgeBase>>,
}

impl InMemoryKnowledgeBaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: impl IntoIterator<Item = KnowledgeBase>) -> Self {
        let entries = entities.into_iter().map(|kb| (kb.id, kb)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn insert(&self, kb: KnowledgeBase) {
        self.entries.write().await.insert(kb.id, kb);
    }
}

#[async_trait]
impl KnowledgeBaseRepository for InMemoryKnowledgeBaseRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<KnowledgeBase>, DomainError> {
        Ok(self.entries.read().await.get(&id).cloned())
    }
}
