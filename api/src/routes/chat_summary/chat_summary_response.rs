use answer_engine::Language;
use serde::Serialize;

/// Response body for `POST /chat-summary`.
#[derive(Debug, Serialize)]
pub struct ChatSummaryResponse {
    pub summary: String,
    pub language: Language,
}
