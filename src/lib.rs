//! RAG Chat Gateway
//!
//! A retrieval-augmented chat API: conversations are answered either
//! directly by a configured chat model or grounded in a knowledge base via
//! vector search, optional Cohere reranking and a fixed prompt template.
//! Replies are buffered JSON or a stream of blank-line-delimited JSON
//! chunks.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{KnowledgeBase, Reranker};
use infrastructure::embedding::EmbeddingFactory;
use infrastructure::http_client::HttpClient;
use infrastructure::knowledge_base::InMemoryKnowledgeBaseRepository;
use infrastructure::llm::ProviderFamilies;
use infrastructure::rerank::CohereReranker;
use infrastructure::services::ChatService;
use infrastructure::vector_store::VectorStoreFactory;

/// Wire the application state from configuration.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let http_client = HttpClient::new();

    let knowledge_bases = Arc::new(InMemoryKnowledgeBaseRepository::with_entities(
        config
            .knowledge_bases
            .iter()
            .map(|seed| KnowledgeBase::new(seed.id, &seed.name, &seed.embedding)),
    ));
    info!(
        count = config.knowledge_bases.len(),
        "Registered knowledge bases"
    );

    let embedding_factory = Arc::new(EmbeddingFactory::new(
        config.providers.clone(),
        http_client.clone(),
    ));
    let retriever_factory = Arc::new(VectorStoreFactory::new(
        config.vector_store.clone(),
        http_client.clone(),
    ));
    info!(backend = %config.vector_store.backend, "Vector store backend selected");

    let llm_factory = Arc::new(ProviderFamilies::from_config(
        &config.providers,
        http_client.clone(),
    ));

    let reranker = config.rerank.cohere_api_key.as_ref().map(|api_key| {
        info!("Cohere reranking enabled");
        Arc::new(CohereReranker::new(http_client.clone(), api_key)) as Arc<dyn Reranker>
    });

    let chat_service = Arc::new(ChatService::new(
        knowledge_bases,
        embedding_factory,
        retriever_factory,
        llm_factory,
        reranker,
    ));

    AppState::new(chat_service)
}
