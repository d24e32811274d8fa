use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::{DomainError, EmbeddingProvider, RetrievedDocument, Retriever};
use crate::infrastructure::http_client::HttpClientTrait;

use super::DEFAULT_TOP_K;

/// Chroma retriever. Holds only the URL and collection name; the collection
/// id is resolved on first use.
#[derive(Debug)]
pub struct ChromaRetriever<C: HttpClientTrait> {
    client: C,
    base_url: String,
    collection_name: String,
    embeddings: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl<C: HttpClientTrait> ChromaRetriever<C> {
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

    fn collection_url(&self) -> String {
        format!(
            "{}/api/v1/collections/{}",
            self.base_url, self.collection_name
        )
    }

    fn query_url(&self, collection_id: &str) -> String {
        format!("{}/api/v1/collections/{}/query", self.base_url, collection_id)
    }

    async fn resolve_collection_id(&self) -> Result<String, DomainError> {
        let collection = self
            .client
            .get_json(&self.collection_url(), vec![])
            .await?;

        collection
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::provider(
                    "chroma",
                    format!("Collection '{}' has no id", self.collection_name),
                )
            })
    }
}

#[derive(Debug, Deserialize)]
struct ChromaQueryResponse {
    documents: Vec<Vec<String>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<Map<String, Value>>>>>,
}

#[async_trait]
impl<C: HttpClientTrait> Retriever for ChromaRetriever<C> {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, DomainError> {
        let vector = self.embeddings.embed_query(query).await?;
        let collection_id = self.resolve_collection_id().await?;

        let body = serde_json::json!({
            "query_embeddings": [vector],
            "n_results": self.top_k,
            "include": ["documents", "metadatas"],
        });

        let json = self
            .client
            .post_json(
                &self.query_url(&collection_id),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: ChromaQueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("chroma", format!("Failed to parse query response: {}", e))
        })?;

        let documents = response.documents.into_iter().next().unwrap_or_default();
        let mut metadatas = response
            .metadatas
            .and_then(|m| m.into_iter().next())
            .unwrap_or_default()
            .into_iter();

        let results = documents
            .into_iter()
            .map(|content| RetrievedDocument {
                page_content: content,
                metadata: metadatas.next().flatten().unwrap_or_default(),
            })
            .collect();

        Ok(results)
    }
}
