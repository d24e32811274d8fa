//! Domain model: conversation types, collaborator traits and errors.

pub mod chat;
pub mod embedding;
pub mod error;
pub mod knowledge_base;
pub mod llm;
pub mod retrieval;

pub use chat::{
    ChatCompletion, ChatEventStream, ChatMode, ChatReply, ChatRequest, ResponseMode, StreamEvent,
};
pub use embedding::{EmbeddingProvider, EmbeddingProviderFactory};
pub use error::DomainError;
pub use knowledge_base::{KnowledgeBase, KnowledgeBaseRepository};
pub use llm::{
    LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse, LlmStream, Message, MessageRole,
    StreamChunk,
};
pub use retrieval::{Reranker, RetrievedDocument, Retriever, RetrieverFactory};
