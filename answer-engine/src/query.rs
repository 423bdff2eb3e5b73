//! Incoming-query data model for one pipeline invocation.

use serde::{Deserialize, Serialize};

/// Response language requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Wire value sent to the upstream service.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of the conversation, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub content: String,
}

/// One incoming chat message plus the context needed to resolve it.
///
/// `history` is chronological; its most recent entry may duplicate `text`
/// and is excluded when the fallback synthesizer scans for prior
/// questions. The pipeline owns this value for the duration of one call
/// and keeps no state beyond it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatQuery {
    pub text: String,
    #[serde(default)]
    pub language: Language,
    /// Upstream session to continue, when the conversation already exists.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Caller-selected filter tags, turned into a metadata filter.
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}
