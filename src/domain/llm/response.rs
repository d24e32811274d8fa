use serde::{Deserialize, Serialize};

use super::Message;

/// Response from a chat model provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub model: String,
    pub message: Message,
}

impl LlmResponse {
    pub fn new(model: impl Into<String>, message: Message) -> Self {
        Self {
            model: model.into(),
            message,
        }
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

/// Incremental fragment from a streaming chat model invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub delta: Option<String>,
    pub done: bool,
}

impl StreamChunk {
    pub fn content(delta: impl Into<String>) -> Self {
        Self {
            delta: Some(delta.into()),
            done: false,
        }
    }

    pub fn finished() -> Self {
        Self {
            delta: None,
            done: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_content() {
        let response = LlmResponse::new("llama3", Message::assistant("Hello!"));
        assert_eq!(response.content(), "Hello!");
    }

    #[test]
    fn test_stream_chunk_constructors() {
        let chunk = StreamChunk::content("Hel");
        assert_eq!(chunk.delta.as_deref(), Some("Hel"));
        assert!(!chunk.done);

        let done = StreamChunk::finished();
        assert_eq!(done.delta, None);
        assert!(done.done);
    }
}
