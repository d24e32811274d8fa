use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::http_client::HttpClientTrait;

/// Ollama embeddings client (`/api/embeddings`)
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": text,
        });

        let json = self
            .client
            .post_json(
                &self.embeddings_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: OllamaEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse embeddings: {}", e))
        })?;

        Ok(response.embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "http://localhost:11434/api/embeddings";

    #[tokio::test]
    async fn test_embed_query() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({ "embedding": [0.1, 0.2, 0.3] }));
        let provider =
            OllamaEmbeddingProvider::new(client, "http://localhost:11434", "nomic-embed-text");

        let vector = provider.embed_query("hello").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(provider.model(), "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_malformed_response_is_an_error() {
        let client =
            MockHttpClient::new().with_response(TEST_URL, serde_json::json!({ "unexpected": 1 }));
        let provider =
            OllamaEmbeddingProvider::new(client, "http://localhost:11434", "nomic-embed-text");

        assert!(provider.embed_query("hello").await.is_err());
    }
}
