use chat_store::UserRecord;
use serde::Serialize;

/// Response body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_info: UserInfo,
}

/// Public user profile, also returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserRecord> for UserInfo {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
