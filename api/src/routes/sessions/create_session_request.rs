use serde::Deserialize;

/// Request body for `POST /chat-sessions`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
}
