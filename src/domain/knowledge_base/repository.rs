use async_trait::async_trait;
use std::fmt::Debug;

use super::KnowledgeBase;
use crate::domain::DomainError;

/// Lookup interface for knowledge bases.
#[async_trait]
pub trait KnowledgeBaseRepository: Send + Sync + Debug {
    async fn find_by_id(&self, id: i64) -> Result<Option<KnowledgeBase>, DomainError>;
}
