//! Relevance reranking via the Cohere API.

pub mod cohere;

pub use cohere::CohereReranker;
