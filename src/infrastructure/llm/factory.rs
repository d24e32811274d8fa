use std::sync::Arc;

use crate::config::ProvidersConfig;
use crate::domain::{DomainError, LlmProvider, LlmProviderFactory};
use crate::infrastructure::http_client::HttpClient;

use super::{OllamaProvider, OpenAiProvider};

/// Maps a request's model family onto a configured provider.
#[derive(Debug)]
pub struct ProviderFamilies {
    openai: Option<Arc<dyn LlmProvider>>,
    ollama: Arc<dyn LlmProvider>,
}

impl ProviderFamilies {
    pub fn from_config(config: &ProvidersConfig, client: HttpClient) -> Self {
        let openai = config.openai_api_key.as_ref().map(|api_key| {
            let provider = match &config.openai_base_url {
                Some(base_url) => OpenAiProvider::with_base_url(client.clone(), api_key, base_url),
                None => OpenAiProvider::new(client.clone(), api_key),
            };
            Arc::new(provider) as Arc<dyn LlmProvider>
        });

        let ollama =
            Arc::new(OllamaProvider::new(client, &config.ollama_base_url)) as Arc<dyn LlmProvider>;

        Self { openai, ollama }
    }
}

impl LlmProviderFactory for ProviderFamilies {
    fn for_family(&self, family: &str) -> Result<Arc<dyn LlmProvider>, DomainError> {
        match family {
            "openai" => self.openai.clone().ok_or_else(|| {
                DomainError::configuration(
                    "Model family 'openai' requested but OPENAI_API_KEY is not configured",
                )
            }),
            "ollama" => Ok(self.ollama.clone()),
            other => Err(DomainError::configuration(format!(
                "Unsupported model family: {}",
                other
            ))),
        }
    }
}
