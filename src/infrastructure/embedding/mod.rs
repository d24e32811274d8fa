//! Embedding clients and the model-name factory.

pub mod factory;
pub mod ollama;
pub mod openai;

pub use factory::EmbeddingFactory;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
