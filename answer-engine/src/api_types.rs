//! Canonical output types of the pipeline.

use std::collections::HashMap;

use serde::Serialize;

/// One supporting excerpt attached to an answer.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    /// Document excerpt, truncated for display (≤ 200 chars + ellipsis).
    pub excerpt: String,
    /// Upstream relevance score; ordering follows the upstream rank.
    pub relevance_score: f32,
    /// Flattened metadata attributes (last value wins on duplicate keys).
    pub attributes: HashMap<String, String>,
}

/// Canonical answer produced by the normalizer, returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    /// Final answer text shown to the user.
    pub answer_text: String,
    /// Session id to continue the conversation with, when one exists.
    pub session_id: Option<String>,
    /// At most three sources, in upstream order.
    pub sources: Vec<SourceRef>,
    /// Set when the upstream reported an empty corpus; tells the caller
    /// that document ingestion has not happened yet.
    #[serde(skip)]
    pub corpus_empty: bool,
}

impl AnswerResult {
    /// Answer with no sources and no corpus signal.
    pub fn plain(answer_text: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            answer_text: answer_text.into(),
            session_id,
            sources: Vec::new(),
            corpus_empty: false,
        }
    }
}
