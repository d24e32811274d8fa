use serde::{Deserialize, Serialize};

use super::Message;

/// Parameters for a chat model invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub stream: bool,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            stream: false,
        }
    }

    /// A request carrying a single rendered prompt as the user turn.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(prompt)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_prompt() {
        let request = LlmRequest::from_prompt("Answer the question");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "Answer the question");
        assert!(!request.stream);
    }
}
