//! Opaque bearer-token authentication.
//!
//! Tokens are random uuids held in an in-memory map for the lifetime of
//! the process. Every protected route calls [`require_user`]; any
//! missing, malformed, or unknown token yields a plain 401 with no
//! internal detail.

use axum::http::{HeaderMap, header};
use chat_store::UserRecord;
use tracing::debug;
use uuid::Uuid;

use crate::{core::app_state::AppState, error_handler::AppError};

/// Issues a fresh bearer token for `username` and records it.
pub fn issue_token(state: &AppState, username: &str) -> String {
    let token = Uuid::new_v4().to_string();
    state
        .tokens
        .write()
        .expect("token map poisoned")
        .insert(token.clone(), username.to_string());
    token
}

/// Resolves the request's bearer token to an active user.
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<UserRecord, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    let username = state
        .tokens
        .read()
        .expect("token map poisoned")
        .get(token)
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    match state.store.get_user_by_username(&username) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AppError::Unauthorized),
        Err(e) => {
            debug!(error = %e, "user lookup failed during token verification");
            Err(AppError::Unauthorized)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issued_token_resolves_to_its_user() {
        let state = AppState::for_tests();
        let token = issue_token(&state, "admin");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let user = require_user(&state, &headers).expect("authenticated");
        assert_eq!(user.username, "admin");
    }

    #[test]
    fn unknown_or_missing_token_is_rejected() {
        let state = AppState::for_tests();

        let empty = HeaderMap::new();
        assert!(matches!(
            require_user(&state, &empty),
            Err(AppError::Unauthorized)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-real-token"),
        );
        assert!(matches!(
            require_user(&state, &headers),
            Err(AppError::Unauthorized)
        ));
    }
}
