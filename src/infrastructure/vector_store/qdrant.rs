use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::{DomainError, EmbeddingProvider, RetrievedDocument, Retriever};
use crate::infrastructure::http_client::HttpClientTrait;

use super::DEFAULT_TOP_K;

/// Qdrant retriever over the REST search endpoint. Documents live in the
/// point payload under `content` and `metadata`.
#[derive(Debug)]
pub struct QdrantRetriever<C: HttpClientTrait> {
    client: C,
    base_url: String,
    collection_name: String,
    embeddings: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl<C: HttpClientTrait> QdrantRetriever<C> {
    pub fn new(
        client: C,
        base_url: impl Into<String>,
        collection_name: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection_name: collection_name.into(),
            embeddings,
            top_k: DEFAULT_TOP_K,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection_name
        )
    }
}

#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    result: Vec<QdrantPoint>,
}

#[derive(Debug, Deserialize)]
struct QdrantPoint {
    #[serde(default)]
    payload: Option<Map<String, Value>>,
}

#[async_trait]
impl<C: HttpClientTrait> Retriever for QdrantRetriever<C> {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, DomainError> {
        let vector = self.embeddings.embed_query(query).await?;

        let body = serde_json::json!({
            "vector": vector,
            "limit": self.top_k,
            "with_payload": true,
        });

        let json = self
            .client
            .post_json(
                &self.search_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: QdrantSearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("qdrant", format!("Failed to parse search response: {}", e))
        })?;

        let results = response
            .result
            .into_iter()
            .map(|point| {
                let mut payload = point.payload.unwrap_or_default();
                let page_content = payload
                    .remove("content")
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                let metadata = match payload.remove("metadata") {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };

                RetrievedDocument {
                    page_content,
                    metadata,
                }
            })
            .collect();

        Ok(results)
    }
}
