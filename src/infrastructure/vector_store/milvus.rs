use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::{DomainError, EmbeddingProvider, RetrievedDocument, Retriever};
use crate::infrastructure::http_client::HttpClientTrait;

use super::DEFAULT_TOP_K;

/// Milvus retriever over the v2 REST search endpoint. The `text` field holds
/// document content; remaining output fields become metadata.
#[derive(Debug)]
pub struct MilvusRetriever<C: HttpClientTrait> {
    client: C,
    base_url: String,
    collection_name: String,
    embeddings: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl<C: HttpClientTrait> MilvusRetriever<C> {
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
        format!("{}/v2/vectordb/entities/search", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct MilvusSearchResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<Map<String, Value>>,
}

#[async_trait]
impl<C: HttpClientTrait> Retriever for MilvusRetriever<C> {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, DomainError> {
        let vector = self.embeddings.embed_query(query).await?;

        let body = serde_json::json!({
            "collectionName": self.collection_name,
            "data": [vector],
            "annsField": "vector",
            "limit": self.top_k,
            "outputFields": ["*"],
        });

        let json = self
            .client
            .post_json(
                &self.search_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: MilvusSearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("milvus", format!("Failed to parse search response: {}", e))
        })?;

        if response.code != 0 {
            return Err(DomainError::provider(
                "milvus",
                format!(
                    "Search failed with code {}: {}",
                    response.code,
                    response.message.unwrap_or_default()
                ),
            ));
        }

        let results = response
            .data
            .into_iter()
            .map(|mut fields| {
                let page_content = fields
                    .remove("text")
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();

                fields.remove("distance");
                fields.remove("id");
                fields.remove("vector");

                RetrievedDocument {
                    page_content,
                    metadata: fields,
                }
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::provider::mock::MockEmbeddingProvider;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;

    const TEST_URL: &str = "http://localhost:19530/v2/vectordb/entities/search";

    #[tokio::test]
    async fn test_retrieve_splits_text_from_metadata() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({
                "code": 0,
                "data": [
                    { "id": 1, "distance": 0.9, "text": "A passage.", "source": "a.md" },
                ],
            }),
        );

        let retriever = MilvusRetriever::new(
            client,
            "http://localhost:19530",
            "collection_1",
            Arc::new(MockEmbeddingProvider::new("mock-embedding", 8)),
        );

        let docs = retriever.retrieve("what is X?").await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "A passage.");
        assert_eq!(docs[0].metadata.get("source"), Some(&json!("a.md")));
        assert!(!docs[0].metadata.contains_key("distance"));
    }

    #[tokio::test]
    async fn test_nonzero_code_is_an_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({ "code": 1100, "message": "collection not found", "data": [] }),
        );

        let retriever = MilvusRetriever::new(
            client,
            "http://localhost:19530",
            "collection_1",
            Arc::new(MockEmbeddingProvider::new("mock-embedding", 8)),
        );

        assert!(retriever.retrieve("query").await.is_err());
    }
}
