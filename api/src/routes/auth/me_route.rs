use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};

use crate::{
    core::{app_state::AppState, auth},
    error_handler::AppResult,
    routes::auth::login_response::UserInfo,
};

/// Returns the profile of the token's owner.
pub async fn me_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Json<UserInfo>> {
    let user = auth::require_user(&state, &headers)?;
    Ok(Json(user.into()))
}
