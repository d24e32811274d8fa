use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, Reranker, RetrievedDocument};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";

/// Rerank model the service is pinned to.
pub const RERANK_MODEL: &str = "rerank-multilingual-v2.0";

/// Cohere `/v1/rerank` client
#[derive(Debug)]
pub struct CohereReranker<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> CohereReranker<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_COHERE_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn rerank_url(&self) -> String {
        format!("{}/v1/rerank", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct CohereRerankResponse {
    results: Vec<CohereRerankResult>,
}

#[derive(Debug, Deserialize)]
struct CohereRerankResult {
    index: usize,
}

#[async_trait]
impl<C: HttpClientTrait> Reranker for CohereReranker<C> {
    async fn rerank(
        &self,
        query: &str,
        documents: Vec<RetrievedDocument>,
        top_n: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let texts: Vec<&str> = documents
            .iter()
            .map(|doc| doc.page_content.as_str())
            .collect();

        let body = serde_json::json!({
            "model": RERANK_MODEL,
            "query": query,
            "documents": texts,
            "top_n": top_n,
        });

        let json = self
            .client
            .post_json(
                &self.rerank_url(),
                vec![
                    ("Authorization", self.auth_header.as_str()),
                    ("Content-Type", "application/json"),
                ],
                &body,
            )
            .await?;

        let response: CohereRerankResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("cohere", format!("Failed to parse rerank response: {}", e))
        })?;

        // Results arrive in descending relevance order; map each index back
        // onto the candidate it scored.
        response
            .results
            .into_iter()
            .map(|result| {
                documents.get(result.index).cloned().ok_or_else(|| {
                    DomainError::provider(
                        "cohere",
                        format!("Rerank result index {} out of range", result.index),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;

    const TEST_URL: &str = "https://api.cohere.com/v1/rerank";

    fn candidates() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument::new("Alpha"),
            RetrievedDocument::new("Beta"),
            RetrievedDocument::new("Gamma"),
        ]
    }

    #[tokio::test]
    async fn test_rerank_reorders_by_relevance() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({
                "results": [
                    { "index": 2, "relevance_score": 0.98 },
                    { "index": 0, "relevance_score": 0.42 },
                ],
            }),
        );
        let reranker = CohereReranker::new(client, "co-test");

        let reranked = reranker.rerank("query", candidates(), 2).await.unwrap();

        assert_eq!(reranked.len(), 2);
        assert_eq!(reranked[0].page_content, "Gamma");
        assert_eq!(reranked[1].page_content, "Alpha");
    }

    #[tokio::test]
    async fn test_empty_candidates_skip_the_api() {
        let client = MockHttpClient::new();
        let reranker = CohereReranker::new(client, "co-test");

        let reranked = reranker.rerank("query", Vec::new(), 4).await.unwrap();

        assert!(reranked.is_empty());
        assert_eq!(reranker.client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_an_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({ "results": [{ "index": 9, "relevance_score": 0.9 }] }),
        );
        let reranker = CohereReranker::new(client, "co-test");

        assert!(reranker.rerank("query", candidates(), 4).await.is_err());
    }

    #[tokio::test]
    async fn test_api_error_propagates() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 401: invalid key");
        let reranker = CohereReranker::new(client, "bad-key");

        assert!(reranker.rerank("query", candidates(), 4).await.is_err());
    }
}
