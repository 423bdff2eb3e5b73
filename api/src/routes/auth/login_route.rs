use std::sync::Arc;

use axum::{Json, extract::State};
use chat_store::hash_password;
use tracing::{info, warn};

use crate::{
    core::{app_state::AppState, auth},
    error_handler::{AppError, AppResult},
    routes::auth::{login_request::LoginRequest, login_response::LoginResponse},
};

/// Authenticates a user and issues an opaque bearer token.
///
/// Unknown usernames and wrong passwords both map to the same 401 to
/// avoid account enumeration.
pub async fn login_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .get_user_by_username(&body.username)?
        .ok_or(AppError::Unauthorized)?;

    if hash_password(&body.password) != user.password_hash {
        return Err(AppError::Unauthorized);
    }

    if let Err(e) = state.store.update_last_login(&user.username) {
        warn!(error = %e, "failed to record last login");
    }

    let access_token = auth::issue_token(&state, &user.username);
    info!(username = %user.username, "user logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        user_info: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_credentials_log_in() {
        let state = AppState::for_tests();
        let body = LoginRequest {
            username: "admin".into(),
            password: "admin123".into(),
        };
        let Json(resp) = login_route(State(state), Json(body)).await.expect("login");
        assert_eq!(resp.token_type, "bearer");
        assert_eq!(resp.user_info.role, "admin");
        assert!(!resp.access_token.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let state = AppState::for_tests();
        let body = LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        };
        assert!(matches!(
            login_route(State(state), Json(body)).await,
            Err(AppError::Unauthorized)
        ));
    }
}
