use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use chat_store::SessionRecord;
use serde::Serialize;
use tracing::warn;

use crate::{
    core::{app_state::AppState, auth},
    error_handler::AppResult,
};

#[derive(Debug, Serialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionRecord>,
}

/// Lists the caller's chat sessions, most recent activity first.
///
/// A storage failure degrades to an empty list rather than breaking
/// the client.
pub async fn list_sessions_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Json<ListSessionsResponse>> {
    let user = auth::require_user(&state, &headers)?;

    let sessions = match state.store.list_sessions(user.id) {
        Ok(sessions) => sessions,
        Err(e) => {
            warn!(error = %e, username = %user.username, "failed to list chat sessions");
            Vec::new()
        }
    };

    Ok(Json(ListSessionsResponse { sessions }))
}
