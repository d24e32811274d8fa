//! Request-scoped services composing the domain collaborators.

pub mod chat_service;

pub use chat_service::{ChatService, RERANK_TOP_N};
