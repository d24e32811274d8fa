use std::sync::Arc;

use crate::config::ProvidersConfig;
use crate::domain::{DomainError, EmbeddingProvider, EmbeddingProviderFactory};
use crate::infrastructure::http_client::HttpClient;

use super::{OllamaEmbeddingProvider, OpenAiEmbeddingProvider};

/// Chooses the embedding client from the knowledge base's embedding model
/// name: OpenAI `text-embedding*` models go to OpenAI, everything else to
/// Ollama.
#[derive(Debug)]
pub struct EmbeddingFactory {
    config: ProvidersConfig,
    client: HttpClient,
}

impl EmbeddingFactory {
    pub fn new(config: ProvidersConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl EmbeddingProviderFactory for EmbeddingFactory {
    fn create(&self, model: &str) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        if model.starts_with("text-embedding") {
            let api_key = self.config.openai_api_key.as_ref().ok_or_else(|| {
                DomainError::configuration(format!(
                    "Embedding model '{}' requires OPENAI_API_KEY",
                    model
                ))
            })?;

            let provider = match &self.config.openai_base_url {
                Some(base_url) => OpenAiEmbeddingProvider::with_base_url(
                    self.client.clone(),
                    api_key,
                    base_url,
                    model,
                ),
                None => OpenAiEmbeddingProvider::new(self.client.clone(), api_key, model),
            };

            return Ok(Arc::new(provider));
        }

        Ok(Arc::new(OllamaEmbeddingProvider::new(
            self.client.clone(),
            &self.config.ollama_base_url,
            model,
        )))
    }
}
