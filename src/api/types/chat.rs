//! Chat endpoint wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::chat::{ChatCompletion, ChatMode, ChatRequest, ResponseMode};
use crate::domain::{Message, RetrievedDocument};

/// Message roles accepted on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: String,
}

/// Incoming chat request body.
///
/// `stream` is any JSON value, interpreted for truthiness rather than parsed
/// as a strict boolean.
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default, rename = "knowledgebaseId")]
    pub knowledgebase_id: Option<i64>,
    pub model: String,
    pub family: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: Value,
}

impl ChatRequestBody {
    /// Resolve the dynamic fields into tagged variants before dispatch.
    pub fn into_domain(self) -> ChatRequest {
        let mode = ChatMode::from_knowledgebase_id(self.knowledgebase_id);
        let response = if is_truthy(&self.stream) {
            ResponseMode::Streamed
        } else {
            ResponseMode::Buffered
        };

        let messages = self
            .messages
            .into_iter()
            .map(|message| match message.role {
                ChatMessageRole::User => Message::user(message.content),
                ChatMessageRole::Assistant => Message::assistant(message.content),
            })
            .collect();

        ChatRequest::new(mode, self.model, self.family, messages, response)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Buffered response body: `{"message": {...}}`
#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseMessage {
    pub role: ChatMessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_docs: Option<Vec<RetrievedDocument>>,
}

impl From<ChatCompletion> for ChatResponseBody {
    fn from(completion: ChatCompletion) -> Self {
        Self {
            message: ChatResponseMessage {
                role: ChatMessageRole::Assistant,
                content: completion.content,
                relevant_docs: completion.relevant_docs,
            },
        }
    }
}

/// Streamed partial message: `{"message": {"role": "assistant", "content": ...}}`
#[derive(Debug, Serialize)]
pub struct StreamMessageChunk<'a> {
    pub message: StreamMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct StreamMessage<'a> {
    pub role: ChatMessageRole,
    pub content: &'a str,
}

impl<'a> StreamMessageChunk<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            message: StreamMessage {
                role: ChatMessageRole::Assistant,
                content,
            },
        }
    }
}

/// Terminal documents marker, emitted exactly once at the end of a streamed
/// RAG reply.
#[derive(Debug, Serialize)]
pub struct RelevantDocumentsChunk<'a> {
    #[serde(rename = "type")]
    pub chunk_type: &'static str,
    pub relevant_documents: &'a [RetrievedDocument],
}

impl<'a> RelevantDocumentsChunk<'a> {
    pub fn new(relevant_documents: &'a [RetrievedDocument]) -> Self {
        Self {
            chunk_type: "relevant_documents",
            relevant_documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(raw: Value) -> ChatRequestBody {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_missing_knowledgebase_id_means_plain_mode() {
        let request = body(json!({
            "model": "llama3",
            "family": "ollama",
            "messages": [{ "role": "user", "content": "hi" }],
        }))
        .into_domain();

        assert_eq!(request.mode, ChatMode::Plain);
        assert_eq!(request.response, ResponseMode::Buffered);
    }

    #[test]
    fn test_zero_knowledgebase_id_means_plain_mode() {
        let request = body(json!({
            "knowledgebaseId": 0,
            "model": "llama3",
            "family": "ollama",
            "messages": [{ "role": "user", "content": "hi" }],
        }))
        .into_domain();

        assert_eq!(request.mode, ChatMode::Plain);
    }

    #[test]
    fn test_nonzero_knowledgebase_id_means_rag_mode() {
        let request = body(json!({
            "knowledgebaseId": 7,
            "model": "llama3",
            "family": "ollama",
            "messages": [{ "role": "user", "content": "hi" }],
        }))
        .into_domain();

        assert_eq!(request.mode, ChatMode::Rag { knowledgebase_id: 7 });
    }

    #[test]
    fn test_stream_flag_truthiness() {
        for (flag, expected) in [
            (json!(true), ResponseMode::Streamed),
            (json!(false), ResponseMode::Buffered),
            (json!(1), ResponseMode::Streamed),
            (json!(0), ResponseMode::Buffered),
            (json!("yes"), ResponseMode::Streamed),
            (json!(""), ResponseMode::Buffered),
            (json!(null), ResponseMode::Buffered),
            (json!({}), ResponseMode::Streamed),
        ] {
            let request = body(json!({
                "model": "llama3",
                "family": "ollama",
                "messages": [],
                "stream": flag,
            }))
            .into_domain();

            assert_eq!(request.response, expected);
        }
    }

    #[test]
    fn test_messages_preserve_order_and_roles() {
        let request = body(json!({
            "model": "llama3",
            "family": "ollama",
            "messages": [
                { "role": "user", "content": "one" },
                { "role": "assistant", "content": "two" },
            ],
        }))
        .into_domain();

        assert_eq!(
            request.messages,
            vec![Message::user("one"), Message::assistant("two")]
        );
    }

    #[test]
    fn test_buffered_body_with_documents() {
        let body = ChatResponseBody::from(ChatCompletion {
            content: "The answer.".to_string(),
            relevant_docs: Some(vec![RetrievedDocument::new("A passage.")]),
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"]["role"], "assistant");
        assert_eq!(json["message"]["content"], "The answer.");
        assert_eq!(
            json["message"]["relevant_docs"][0]["pageContent"],
            "A passage."
        );
    }

    #[test]
    fn test_buffered_body_without_documents_omits_the_field() {
        let body = ChatResponseBody::from(ChatCompletion {
            content: "The answer.".to_string(),
            relevant_docs: None,
        });

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["message"].get("relevant_docs").is_none());
    }

    #[test]
    fn test_stream_message_chunk_shape() {
        let chunk = StreamMessageChunk::new("frag");
        let json = serde_json::to_string(&chunk).unwrap();

        assert_eq!(
            json,
            "{\"message\":{\"role\":\"assistant\",\"content\":\"frag\"}}"
        );
    }

    #[test]
    fn test_relevant_documents_chunk_shape() {
        let docs = vec![RetrievedDocument::new("A passage.")];
        let chunk = RelevantDocumentsChunk::new(&docs);
        let json = serde_json::to_value(&chunk).unwrap();

        assert_eq!(json["type"], "relevant_documents");
        assert_eq!(json["relevant_documents"][0]["pageContent"], "A passage.");
    }
}
