use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, LlmProvider, LlmRequest, LlmResponse, LlmStream, Message, MessageRole,
    StreamChunk,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama chat provider speaking the `/api/chat` NDJSON protocol
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OllamaMessage> = request
            .messages
            .iter()
            .map(OllamaMessage::from_domain)
            .collect();

        serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": request.stream,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![("Content-Type", "application/json")]
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let mut req = request;
        req.stream = false;

        let url = self.chat_url();
        let body = self.build_request(model, &req);
        let json = self.client.post_json(&url, self.headers(), &body).await?;

        let response: OllamaChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse response: {}", e))
        })?;

        let message = Message::assistant(response.message.map(|m| m.content).unwrap_or_default());
        Ok(LlmResponse::new(model, message))
    }

    async fn chat_stream(
        &self,
        model: &str,
        request: LlmRequest,
    ) -> Result<LlmStream, DomainError> {
        let mut req = request;
        req.stream = true;

        let url = self.chat_url();
        let body = self.build_request(model, &req);
        let byte_stream = self
            .client
            .post_json_stream(&url, self.headers(), &body)
            .await?;

        let stream = byte_stream.flat_map(|result| match result {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                stream::iter(parse_ndjson_lines(&text))
            }
            Err(e) => stream::iter(vec![Err(e)]),
        });

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

/// Parse every complete NDJSON line in a network chunk. Lines split across
/// chunk boundaries are dropped.
fn parse_ndjson_lines(text: &str) -> Vec<Result<StreamChunk, DomainError>> {
    let mut chunks = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Ok(parsed) = serde_json::from_str::<OllamaStreamLine>(line) {
            if let Some(message) = parsed.message {
                if !message.content.is_empty() {
                    chunks.push(Ok(StreamChunk::content(message.content)));
                }
            }

            if parsed.done {
                chunks.push(Ok(StreamChunk::finished()));
            }
        }
    }

    chunks
}

// Ollama API types

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

impl OllamaMessage {
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
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaStreamLine {
    message: Option<OllamaMessage>,
    #[serde(default)]
    done: bool,
}
