use answer_engine::SourceRef;
use serde::Serialize;

/// Response body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final answer text shown to the user.
    pub message: String,
    /// Id to send back for the next turn; empty when no session exists.
    pub conversation_id: String,
    /// At most three supporting excerpts, in upstream order.
    pub sources: Vec<SourceRef>,
}
