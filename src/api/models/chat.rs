//! Chat endpoint handler

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures::StreamExt;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ChatRequestBody, ChatResponseBody, Json, RelevantDocumentsChunk, StreamMessageChunk,
};
use crate::domain::chat::{ChatEventStream, ChatReply, StreamEvent};

/// POST /api/models/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequestBody>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        model = %body.model,
        family = %body.family,
        knowledgebase_id = ?body.knowledgebase_id,
        "Processing chat request"
    );

    let request = body.into_domain();
    let reply = state.chat_service.handle(request).await?;

    match reply {
        ChatReply::Buffered(completion) => Ok(Json(ChatResponseBody::from(completion)).into_response()),
        ChatReply::Streamed(events) => Ok(stream_response(events)),
    }
}

/// Wrap the event stream into a chunked response: each chunk one JSON object
/// followed by a blank line. An upstream error aborts the body; dropping the
/// body cancels upstream generation.
fn stream_response(events: ChatEventStream) -> Response {
    let body = Body::from_stream(events.map(|item| match item {
        Ok(event) => encode_event(&event).map_err(axum::Error::new),
        Err(e) => Err(axum::Error::new(e)),
    }));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

fn encode_event(event: &StreamEvent) -> Result<Bytes, serde_json::Error> {
    let json = match event {
        StreamEvent::Content(fragment) => {
            serde_json::to_string(&StreamMessageChunk::new(fragment))?
        }
        StreamEvent::Documents(documents) => {
            serde_json::to_string(&RelevantDocumentsChunk::new(documents))?
        }
    };

    Ok(Bytes::from(format!("{}\n\n", json)))
}
