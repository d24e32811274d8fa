use async_trait::async_trait;
use std::fmt::Debug;

use super::RetrievedDocument;
use crate::domain::DomainError;

/// A capability that reorders a candidate document list by relevance to a
/// query, truncating to at most `top_n` results in descending relevance.
#[async_trait]
pub trait Reranker: Send + Sync + Debug {
    async fn rerank(
        &self,
        query: &str,
        documents: Vec<RetrievedDocument>,
        top_n: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Reverses the candidate order and truncates, so tests can tell the
    /// reranked list apart from the retriever's.
    #[derive(Debug, Default)]
    pub struct MockReranker {
        calls: Arc<AtomicUsize>,
    }

    impl MockReranker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Reranker for MockReranker {
        async fn rerank(
            &self,
            _query: &str,
            documents: Vec<RetrievedDocument>,
            top_n: usize,
        ) -> Result<Vec<RetrievedDocument>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let mut reranked: Vec<RetrievedDocument> = documents.into_iter().rev().collect();
            reranked.truncate(top_n);
            Ok(reranked)
        }
    }
}
