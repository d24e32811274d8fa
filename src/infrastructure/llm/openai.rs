use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, LlmProvider, LlmRequest, LlmResponse, LlmStream, Message, MessageRole,
    StreamChunk,
};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> = request
            .messages
            .iter()
            .map(OpenAiMessage::from_domain)
            .collect();

        serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": request.stream,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());
        Ok(LlmResponse::new(response.model, message))
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let mut req = request;
        req.stream = false;

        let url = self.chat_completions_url();
        let body = self.build_request(model, &req);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    async fn chat_stream(
        &self,
        model: &str,
        request: LlmRequest,
    ) -> Result<LlmStream, DomainError> {
        let mut req = request;
        req.stream = true;

        let url = self.chat_completions_url();
        let body = self.build_request(model, &req);
        let byte_stream = self
            .client
            .post_json_stream(&url, self.headers(), &body)
            .await?;

        let stream = byte_stream.flat_map(|result| match result {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                stream::iter(parse_sse_lines(&text))
            }
            Err(e) => stream::iter(vec![Err(e)]),
        });

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Parse every complete `data:` line in a network chunk. Frames split across
/// chunk boundaries are dropped.
fn parse_sse_lines(text: &str) -> Vec<Result<StreamChunk, DomainError>> {
    let mut chunks = Vec::new();

    for line in text.lines() {
        let Some(data) = line.strip_prefix("data: ") else {
            continue;
        };

        if data.trim() == "[DONE]" {
            chunks.push(Ok(StreamChunk::finished()));
            continue;
        }

        if let Ok(parsed) = serde_json::from_str::<OpenAiStreamChunk>(data) {
            if let Some(choice) = parsed.choices.into_iter().next() {
                if let Some(content) = choice.delta.content {
                    chunks.push(Ok(StreamChunk::content(content)));
                }

                if choice.finish_reason.is_some() {
                    chunks.push(Ok(StreamChunk::finished()));
                }
            }
        }
    }

    chunks
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiStreamChunk {
    choices: Vec<OpenAiStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiStreamChoice {
    delta: OpenAiDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiDelta {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use bytes::Bytes;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    #[tokio::test]
    async fn test_openai_chat() {
        let mock_response = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hello! How can I help you?"
                },
                "finish_reason": "stop"
            }]
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = LlmRequest::from_prompt("Hello!");
        let response = provider.chat("gpt-4o-mini", request).await.unwrap();

        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.content(), "Hello! How can I help you?");
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");
        let provider = OpenAiProvider::new(client, "invalid-key");

        let request = LlmRequest::from_prompt("Hello!");
        let result = provider.chat("gpt-4o-mini", request).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let mock_response = serde_json::json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": "Custom response" }
            }]
        });

        let client = MockHttpClient::new().with_response(custom_url, mock_response);
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080");

        let request = LlmRequest::from_prompt("Test");
        let response = provider.chat("gpt-4o-mini", request).await.unwrap();

        assert_eq!(response.content(), "Custom response");
    }

    #[tokio::test]
    async fn test_openai_stream_parsing() {
        let chunks = vec![
            Bytes::from(
                "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"},\"finish_reason\":null}]}\n\n",
            ),
            Bytes::from(
                "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"},\"finish_reason\":null}]}\n\ndata: [DONE]\n\n",
            ),
        ];

        let client = MockHttpClient::new().with_stream_response(TEST_URL, chunks);
        let provider = OpenAiProvider::new(client, "test-key");

        let request = LlmRequest::from_prompt("Hi");
        let stream = provider.chat_stream("gpt-4o-mini", request).await.unwrap();
        let collected: Vec<_> = futures::StreamExt::collect::<Vec<_>>(stream)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert_eq!(collected.len(), 3);
        assert_eq!(collected[0].delta.as_deref(), Some("Hel"));
        assert_eq!(collected[1].delta.as_deref(), Some("lo"));
        assert!(collected[2].done);
    }
}
