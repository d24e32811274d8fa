use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI, Ollama, etc.)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Get the embedding model name this provider is bound to
    fn model(&self) -> &str;
}

/// Resolves an embedding provider from a knowledge base's embedding model name.
pub trait EmbeddingProviderFactory: Send + Sync + Debug {
    fn create(&self, model: &str) -> Result<Arc<dyn EmbeddingProvider>, DomainError>;
}
