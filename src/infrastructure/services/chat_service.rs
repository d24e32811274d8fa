//! The chat request flow: plain chat and retrieval-augmented chat, buffered
//! or streamed.

use futures::{stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::chat::prompt::{format_documents, render_prompt, serialize_messages};
use crate::domain::{
    ChatCompletion, ChatMode, ChatReply, ChatRequest, DomainError, EmbeddingProviderFactory,
    KnowledgeBaseRepository, LlmProviderFactory, LlmRequest, Message, Reranker, ResponseMode,
    RetrieverFactory, StreamEvent,
};

/// Documents kept after reranking, in descending relevance order.
pub const RERANK_TOP_N: usize = 4;

/// Drives a chat request through retrieval, optional reranking, prompt
/// assembly and model invocation.
///
/// Everything is request-scoped: the service holds only collaborators, never
/// per-request state.
#[derive(Debug)]
pub struct ChatService {
    knowledge_bases: Arc<dyn KnowledgeBaseRepository>,
    embedding_factory: Arc<dyn EmbeddingProviderFactory>,
    retriever_factory: Arc<dyn RetrieverFactory>,
    llm_factory: Arc<dyn LlmProviderFactory>,
    reranker: Option<Arc<dyn Reranker>>,
}

impl ChatService {
    pub fn new(
        knowledge_bases: Arc<dyn KnowledgeBaseRepository>,
        embedding_factory: Arc<dyn EmbeddingProviderFactory>,
        retriever_factory: Arc<dyn RetrieverFactory>,
        llm_factory: Arc<dyn LlmProviderFactory>,
        reranker: Option<Arc<dyn Reranker>>,
    ) -> Self {
        Self {
            knowledge_bases,
            embedding_factory,
            retriever_factory,
            llm_factory,
            reranker,
        }
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, DomainError> {
        if request.messages.is_empty() {
            return Err(DomainError::validation("messages must not be empty"));
        }

        match request.mode {
            ChatMode::Rag { knowledgebase_id } => self.rag_chat(knowledgebase_id, request).await,
            ChatMode::Plain => self.plain_chat(request).await,
        }
    }

    async fn rag_chat(
        &self,
        knowledgebase_id: i64,
        request: ChatRequest,
    ) -> Result<ChatReply, DomainError> {
        info!(knowledgebase_id, "Chat with knowledge base");

        let knowledgebase = self
            .knowledge_bases
            .find_by_id(knowledgebase_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Knowledge base with id {} not found",
                    knowledgebase_id
                ))
            })?;

        debug!(
            name = %knowledgebase.name,
            embedding = %knowledgebase.embedding,
            "Resolved knowledge base"
        );

        let embeddings = self.embedding_factory.create(&knowledgebase.embedding)?;
        let retriever = self
            .retriever_factory
            .create(embeddings, &knowledgebase.collection_name())?;
        let provider = self.llm_factory.for_family(&request.family)?;

        let query = last_message_content(&request.messages)?;
        debug!(query = %query, "User query");

        let documents = retriever.retrieve(&query).await?;
        debug!(count = documents.len(), "Retrieved documents");

        let documents = match &self.reranker {
            Some(reranker) => {
                let reranked = reranker
                    .rerank(&query, documents, RERANK_TOP_N)
                    .await?;
                debug!(count = reranked.len(), "Reranked documents");
                reranked
            }
            None => documents,
        };

        let prompt = render_prompt(
            &format_documents(&documents),
            &serialize_messages(&request.messages),
            &query,
        );
        let llm_request = LlmRequest::from_prompt(prompt);

        match request.response {
            ResponseMode::Buffered => {
                let response = provider.chat(&request.model, llm_request).await?;
                Ok(ChatReply::Buffered(ChatCompletion {
                    content: response.content().to_string(),
                    relevant_docs: Some(documents),
                }))
            }
            ResponseMode::Streamed => {
                let upstream = provider.chat_stream(&request.model, llm_request).await?;
                Ok(ChatReply::Streamed(Box::pin(
                    content_events(upstream)
                        .chain(stream::once(async move { Ok(StreamEvent::Documents(documents)) })),
                )))
            }
        }
    }

    async fn plain_chat(&self, request: ChatRequest) -> Result<ChatReply, DomainError> {
        debug!(model = %request.model, family = %request.family, "Plain chat");

        let provider = self.llm_factory.for_family(&request.family)?;
        let llm_request = LlmRequest::new(request.messages);

        match request.response {
            ResponseMode::Buffered => {
                let response = provider.chat(&request.model, llm_request).await?;
                Ok(ChatReply::Buffered(ChatCompletion {
                    content: response.content().to_string(),
                    relevant_docs: None,
                }))
            }
            ResponseMode::Streamed => {
                let upstream = provider.chat_stream(&request.model, llm_request).await?;
                Ok(ChatReply::Streamed(Box::pin(content_events(upstream))))
            }
        }
    }
}

fn last_message_content(messages: &[Message]) -> Result<String, DomainError> {
    messages
        .last()
        .map(|message| message.content.clone())
        .ok_or_else(|| DomainError::validation("messages must not be empty"))
}

/// Map provider chunks onto content events, dropping chunks that carry no
/// text. Errors pass through and end the reply.
fn content_events(
    upstream: crate::domain::LlmStream,
) -> impl futures::Stream<Item = Result<StreamEvent, DomainError>> + Send {
    upstream.filter_map(|item| {
        let mapped = match item {
            Ok(chunk) => chunk.delta.map(|delta| Ok(StreamEvent::Content(delta))),
            Err(e) => Some(Err(e)),
        };
        async move { mapped }
    })
}
