//! Retrieval abstraction: documents, retrievers and reranking.

pub mod document;
pub mod reranker;
pub mod retriever;

pub use document::RetrievedDocument;
pub use reranker::Reranker;
pub use retriever::{Retriever, RetrieverFactory};
