//! Wire types shared across handlers

mod chat;
mod error;
mod json;

pub use chat::{
    ChatMessage, ChatMessageRole, ChatRequestBody, ChatResponseBody, ChatResponseMessage,
    RelevantDocumentsChunk, StreamMessageChunk,
};
pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use json::Json;
