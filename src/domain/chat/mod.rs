//! Chat request model, prompt assembly and reply shapes.

pub mod prompt;
pub mod reply;
pub mod request;

pub use reply::{ChatCompletion, ChatEventStream, ChatReply, StreamEvent};
pub use request::{ChatMode, ChatRequest, ResponseMode};
