use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub vector_store: VectorStoreConfig,
    pub rerank: RerankConfig,
    pub providers: ProvidersConfig,
    pub knowledge_bases: Vec<KnowledgeBaseSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Vector store backend selection plus one connection URL per backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub backend: String,
    pub chroma_url: String,
    pub milvus_url: String,
    pub qdrant_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Reranking is enabled iff a key is present.
    pub cohere_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub ollama_base_url: String,
}

/// Knowledge base registered at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseSeed {
    pub id: i64,
    pub name: String,
    pub embedding: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            backend: "chroma".to_string(),
            chroma_url: "http://localhost:8000".to_string(),
            milvus_url: "http://localhost:19530".to_string(),
            qdrant_url: "http://localhost:6333".to_string(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            ollama_base_url: "http://localhost:11434".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config.with_env_overrides())
    }

    /// Apply the well-known environment variables on top of the layered
    /// configuration.
    fn with_env_overrides(mut self) -> Self {
        if let Ok(backend) = std::env::var("VECTOR_STORE") {
            self.vector_store.backend = backend;
        }
        if let Ok(url) = std::env::var("CHROMADB_URL") {
            self.vector_store.chroma_url = url;
        }
        if let Ok(url) = std::env::var("MILVUS_URL") {
            self.vector_store.milvus_url = url;
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            self.vector_store.qdrant_url = url;
        }
        if let Ok(key) = std::env::var("COHERE_API_KEY") {
            self.rerank.cohere_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.providers.openai_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.providers.ollama_base_url = url;
        }

        self
    }
}
