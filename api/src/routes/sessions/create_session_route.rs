use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    core::{app_state::AppState, auth},
    error_handler::AppResult,
    routes::sessions::create_session_request::CreateSessionRequest,
};

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub last_activity: String,
}

/// Creates an empty chat session owned by the caller.
///
/// The id is generated here; registering it in the database is
/// best-effort so the client always gets a usable session back.
pub async fn create_session_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateSessionRequest>,
) -> AppResult<Json<CreateSessionResponse>> {
    let user = auth::require_user(&state, &headers)?;

    let conversation_id = format!("chat_{}", Uuid::new_v4().simple());
    if let Err(e) = state.store.create_session(&conversation_id, user.id) {
        warn!(error = %e, %conversation_id, "failed to register chat session");
    }

    let now = Utc::now().to_rfc3339();
    Ok(Json(CreateSessionResponse {
        id: conversation_id,
        title: body.title,
        created_at: now.clone(),
        last_activity: now,
    }))
}
