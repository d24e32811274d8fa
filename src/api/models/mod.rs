//! Model-facing endpoints

pub mod chat;

use axum::{routing::post, Router};

use super::state::AppState;

pub fn create_models_router() -> Router<AppState> {
    Router::new().route("/chat", post(chat::chat))
}
