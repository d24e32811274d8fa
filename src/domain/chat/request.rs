use crate::domain::llm::Message;

/// How a chat request resolves its answer.
///
/// Parsed once at the boundary instead of re-checking an optional id at
/// every branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Answer directly from the conversation.
    Plain,
    /// Retrieve from a knowledge base before answering.
    Rag { knowledgebase_id: i64 },
}

impl ChatMode {
    /// An absent or zero id means plain chat.
    pub fn from_knowledgebase_id(id: Option<i64>) -> Self {
        match id {
            Some(id) if id != 0 => Self::Rag {
                knowledgebase_id: id,
            },
            _ => Self::Plain,
        }
    }
}

/// Whether the reply is buffered into one document or streamed in chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Buffered,
    Streamed,
}

/// A fully parsed chat request, owned by a single request flow.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub mode: ChatMode,
    pub model: String,
    pub family: String,
    pub messages: Vec<Message>,
    pub response: ResponseMode,
}

impl ChatRequest {
    pub fn new(
        mode: ChatMode,
        model: impl Into<String>,
        family: impl Into<String>,
        messages: Vec<Message>,
        response: ResponseMode,
    ) -> Self {
        Self {
            mode,
            model: model.into(),
            family: family.into(),
            messages,
            response,
        }
    }
}
