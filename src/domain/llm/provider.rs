use async_trait::async_trait;
use futures::Stream;
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;

use super::response::StreamChunk;
use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Stream type for chat model responses
pub type LlmStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, DomainError>> + Send>>;

/// Trait for chat model providers (OpenAI, Ollama, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Send a streaming chat completion request
    async fn chat_stream(
        &self,
        model: &str,
        request: LlmRequest,
    ) -> Result<LlmStream, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Resolves a chat model provider from a model family name.
///
/// Unknown families fail here; the error propagates to the caller unchanged.
pub trait LlmProviderFactory: Send + Sync + Debug {
    fn for_family(&self, family: &str) -> Result<Arc<dyn LlmProvider>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::llm::Message;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted provider that records every request it receives.
    #[derive(Debug)]
    pub struct MockLlmProvider {
        reply: String,
        error: Option<String>,
        requests: Arc<Mutex<Vec<(String, LlmRequest)>>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockLlmProvider {
        pub fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                error: None,
                requests: Arc::new(Mutex::new(Vec::new())),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn requests(&self) -> Arc<Mutex<Vec<(String, LlmRequest)>>> {
            self.requests.clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self, model: &str, request: &LlmRequest) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((model.to_string(), request.clone()));

            match &self.error {
                Some(error) => Err(DomainError::provider("mock", error)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(
            &self,
            model: &str,
            request: LlmRequest,
        ) -> Result<LlmResponse, DomainError> {
            self.record(model, &request)?;
            Ok(LlmResponse::new(model, Message::assistant(&self.reply)))
        }

        async fn chat_stream(
            &self,
            model: &str,
            request: LlmRequest,
        ) -> Result<LlmStream, DomainError> {
            self.record(model, &request)?;

            let chunks: Vec<Result<StreamChunk, DomainError>> = self
                .reply
                .chars()
                .map(|c| Ok(StreamChunk::content(c.to_string())))
                .chain(std::iter::once(Ok(StreamChunk::finished())))
                .collect();

            Ok(Box::pin(stream::iter(chunks)))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    /// Factory mock counting how many providers it hands out.
    #[derive(Debug)]
    pub struct MockLlmProviderFactory {
        provider: Arc<MockLlmProvider>,
        families: Arc<Mutex<Vec<String>>>,
        created: Arc<AtomicUsize>,
        error: Option<String>,
    }

    impl MockLlmProviderFactory {
        pub fn new(provider: MockLlmProvider) -> Self {
            Self {
                provider: Arc::new(provider),
                families: Arc::new(Mutex::new(Vec::new())),
                created: Arc::new(AtomicUsize::new(0)),
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn provider(&self) -> Arc<MockLlmProvider> {
            self.provider.clone()
        }

        pub fn created_count(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }

        pub fn families(&self) -> Vec<String> {
            self.families.lock().unwrap().clone()
        }
    }

    impl LlmProviderFactory for MockLlmProviderFactory {
        fn for_family(&self, family: &str) -> Result<Arc<dyn LlmProvider>, DomainError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.families.lock().unwrap().push(family.to_string());

            match &self.error {
                Some(error) => Err(DomainError::configuration(error)),
                None => Ok(self.provider.clone()),
            }
        }
    }
}
