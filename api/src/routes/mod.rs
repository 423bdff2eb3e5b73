pub mod auth;
pub mod chat;
pub mod chat_summary;
pub mod documents;
pub mod health;
pub mod sessions;
