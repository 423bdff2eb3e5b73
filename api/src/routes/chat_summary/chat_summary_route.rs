use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use tracing::debug;

use crate::{
    core::{app_state::AppState, auth},
    error_handler::{AppError, AppResult},
    routes::chat_summary::{
        chat_summary_request::ChatSummaryRequest, chat_summary_response::ChatSummaryResponse,
    },
};

/// Summarizes a conversation transcript.
///
/// The summarizer itself never fails; a remote failure degrades to the
/// rule-based summary inside the service.
pub async fn chat_summary_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ChatSummaryRequest>,
) -> AppResult<Json<ChatSummaryResponse>> {
    auth::require_user(&state, &headers)?;

    if body.conversation_history.trim().is_empty() {
        return Err(AppError::BadRequest(
            "No conversation history provided".into(),
        ));
    }

    debug!(
        history_len = body.conversation_history.len(),
        remote = state.summarizer.has_remote(),
        "generating chat summary"
    );

    let summary = state
        .summarizer
        .summarize(&body.conversation_history, body.language)
        .await;

    Ok(Json(ChatSummaryResponse {
        summary,
        language: body.language,
    }))
}
