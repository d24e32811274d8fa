use futures::Stream;
use std::pin::Pin;

use crate::domain::retrieval::RetrievedDocument;
use crate::domain::DomainError;

/// One event in a streamed chat reply.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A partial assistant message fragment.
    Content(String),
    /// The reranked document list. RAG mode emits this exactly once, last.
    Documents(Vec<RetrievedDocument>),
}

/// Lazily produced sequence of reply events. The transport pulls items as the
/// client consumes them; dropping the stream cancels upstream generation.
pub type ChatEventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, DomainError>> + Send>>;

/// A fully buffered chat reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    /// Present in RAG mode only.
    pub relevant_docs: Option<Vec<RetrievedDocument>>,
}

/// Outcome of a chat request: one document, or a stream of wire chunks.
pub enum ChatReply {
    Buffered(ChatCompletion),
    Streamed(ChatEventStream),
}

impl std::fmt::Debug for ChatReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffered(completion) => f.debug_tuple("Buffered").field(completion).finish(),
            Self::Streamed(_) => f.debug_tuple("Streamed").finish(),
        }
    }
}
