//! Vector store clients and the configuration-driven backend selector.

pub mod chroma;
pub mod factory;
pub mod milvus;
pub mod qdrant;

pub use chroma::ChromaRetriever;
pub use factory::{VectorStoreBackend, VectorStoreFactory};
pub use milvus::MilvusRetriever;
pub use qdrant::QdrantRetriever;

/// Number of candidates a retriever returns per query.
pub const DEFAULT_TOP_K: usize = 4;
