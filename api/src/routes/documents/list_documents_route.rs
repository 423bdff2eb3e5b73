use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use chat_store::DocumentRecord;
use serde::Serialize;

use crate::{
    core::{app_state::AppState, auth},
    error_handler::AppResult,
};

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentRecord>,
}

/// Lists the caller's uploaded documents, newest first.
pub async fn list_documents_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Json<ListDocumentsResponse>> {
    let user = auth::require_user(&state, &headers)?;
    let documents = state.store.documents_for_user(user.id)?;
    Ok(Json(ListDocumentsResponse { documents }))
}
