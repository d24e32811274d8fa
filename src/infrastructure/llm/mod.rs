//! Chat model providers and the family factory.

pub mod factory;
pub mod ollama;
pub mod openai;

pub use factory::ProviderFamilies;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
