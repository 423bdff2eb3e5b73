//! Row types returned by the store.

use serde::Serialize;

/// One user account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

/// One saved message exchange (user text + assistant answer).
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRecord {
    pub id: i64,
    pub conversation_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub language: String,
    /// Sources as stored, already-parsed JSON.
    pub sources: serde_json::Value,
    pub created_at: String,
}

/// One chat session with its exchanges, newest activity first in listings.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub conversation_id: String,
    /// Derived from the first user message, or "New Chat".
    pub title: String,
    pub created_at: String,
    pub last_activity: String,
    pub exchanges: Vec<ExchangeRecord>,
}

/// Metadata of an uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub filename: String,
    pub classification: String,
    pub status: String,
    pub created_at: String,
}
