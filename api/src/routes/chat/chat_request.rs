use answer_engine::{HistoryTurn, Language};
use serde::Deserialize;

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Upstream conversation to continue; absent or empty starts a new one.
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub language: Language,
    /// Filter tags restricting the corpus search by document category.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Prior turns, chronological; used only by the fallback synthesizer.
    #[serde(default)]
    pub conversation_history: Vec<HistoryTurn>,
}
