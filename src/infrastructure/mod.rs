//! Concrete collaborators: HTTP clients for model providers, embeddings,
//! vector stores and reranking, plus logging and the chat service.

pub mod embedding;
pub mod http_client;
pub mod knowledge_base;
pub mod llm;
pub mod logging;
pub mod rerank;
pub mod services;
pub mod vector_store;
