pub mod app_config;

pub use app_config::{
    AppConfig, KnowledgeBaseSeed, LogFormat, LoggingConfig, ProvidersConfig, RerankConfig,
    ServerConfig, VectorStoreConfig,
};
