use std::sync::Arc;
use tracing::debug;

use crate::config::VectorStoreConfig;
use crate::domain::{DomainError, EmbeddingProvider, Retriever, RetrieverFactory};
use crate::infrastructure::http_client::HttpClient;

use super::{ChromaRetriever, MilvusRetriever, QdrantRetriever};

/// Recognized vector store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorStoreBackend {
    Chroma,
    Milvus,
    Qdrant,
}

impl VectorStoreBackend {
    /// Any name other than the two recognized strings selects Chroma.
    pub fn from_name(name: &str) -> Self {
        match name {
            "qdrant" => Self::Qdrant,
            "milvus" => Self::Milvus,
            _ => Self::Chroma,
        }
    }
}

/// Builds retriever handles for the configured backend.
///
/// Pure function of configuration: no reachability checks, no network I/O;
/// the underlying client connects on first search.
#[derive(Debug)]
pub struct VectorStoreFactory {
    config: VectorStoreConfig,
    client: HttpClient,
}

impl VectorStoreFactory {
    pub fn new(config: VectorStoreConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    pub fn backend(&self) -> VectorStoreBackend {
        VectorStoreBackend::from_name(&self.config.backend)
    }
}

impl RetrieverFactory for VectorStoreFactory {
    fn create(
        &self,
        embeddings: Arc<dyn EmbeddingProvider>,
        collection_name: &str,
    ) -> Result<Arc<dyn Retriever>, DomainError> {
        let retriever: Arc<dyn Retriever> = match self.backend() {
            VectorStoreBackend::Chroma => {
                debug!(collection = collection_name, "Creating Chroma retriever");
                Arc::new(ChromaRetriever::new(
                    self.client.clone(),
                    &self.config.chroma_url,
                    collection_name,
                    embeddings,
                ))
            }
            VectorStoreBackend::Milvus => {
                debug!(collection = collection_name, "Creating Milvus retriever");
                Arc::new(MilvusRetriever::new(
                    self.client.clone(),
                    &self.config.milvus_url,
                    collection_name,
                    embeddings,
                ))
            }
            VectorStoreBackend::Qdrant => {
                debug!(collection = collection_name, "Creating Qdrant retriever");
                Arc::new(QdrantRetriever::new(
                    self.client.clone(),
                    &self.config.qdrant_url,
                    collection_name,
                    embeddings,
                ))
            }
        };

        Ok(retriever)
    }
}
