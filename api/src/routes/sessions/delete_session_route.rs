use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Serialize;
use tracing::info;

use crate::{
    core::{app_state::AppState, auth},
    error_handler::{AppError, AppResult},
};

#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub message: &'static str,
}

/// Deletes a session owned by the caller. 404 when nothing was deleted,
/// which also covers sessions owned by someone else.
pub async fn delete_session_route(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> AppResult<Json<DeleteSessionResponse>> {
    let user = auth::require_user(&state, &headers)?;

    if !state.store.delete_session(&session_id, user.id)? {
        return Err(AppError::NotFound);
    }

    info!(username = %user.username, %session_id, "chat session deleted");
    Ok(Json(DeleteSessionResponse {
        message: "Chat session deleted",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[tokio::test]
    async fn deleting_a_missing_session_is_not_found() {
        let state = AppState::for_tests();
        let token = auth::issue_token(&state, "user1");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let out = delete_session_route(
            State(state),
            Path("chat_does_not_exist".to_string()),
            headers,
        )
        .await;
        assert!(matches!(out, Err(AppError::NotFound)));
    }
}
