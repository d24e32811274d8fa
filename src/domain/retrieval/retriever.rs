use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::RetrievedDocument;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;

/// A capability that, given a query string, returns an ordered list of
/// relevant documents. Ranking is retriever-defined.
#[async_trait]
pub trait Retriever: Send + Sync + Debug {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, DomainError>;
}

/// Builds a retriever scoped to one vector store collection.
///
/// Construction must not perform network I/O; connecting is deferred to the
/// first `retrieve` call by the underlying client.
pub trait RetrieverFactory: Send + Sync + Debug {
    fn create(
        &self,
        embeddings: Arc<dyn EmbeddingProvider>,
        collection_name: &str,
    ) -> Result<Arc<dyn Retriever>, DomainError>;
}
