//! SQLite-backed persistence for users, chat sessions, and documents.
//!
//! This crate is the best-effort persistence collaborator of the chat
//! pipeline: the API layer calls it after an answer is produced, logs any
//! failure, and never lets a storage problem abort the response to the
//! user. Stored sources are serialized as JSON.

mod models;
mod store;

pub use models::{DocumentRecord, ExchangeRecord, SessionRecord, UserRecord};
pub use store::{ChatStore, hash_password};

use thiserror::Error;

/// Errors of the persistence layer. Callers on the chat path treat these
/// as best-effort: log and continue.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored sources are not valid JSON: {0}")]
    SourcesDecode(#[from] serde_json::Error),
}

/// Result alias for the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
