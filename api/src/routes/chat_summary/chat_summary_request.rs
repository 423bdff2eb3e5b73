use answer_engine::Language;
use serde::Deserialize;

/// Request body for `POST /chat-summary`.
#[derive(Debug, Deserialize)]
pub struct ChatSummaryRequest {
    /// `User:`/`Assistant:` transcript to summarize.
    #[serde(default)]
    pub conversation_history: String,
    #[serde(default)]
    pub language: Language,
}
