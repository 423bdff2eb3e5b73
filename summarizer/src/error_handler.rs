//! Unified error types for the summarizer crate.

use thiserror::Error;

/// Max length of a body snippet embedded into errors and logs.
const SNIPPET_MAX: usize = 240;

/// Errors of the OpenAI summarization path. The public `summarize`
/// entry point never surfaces these; they are logged before the
/// rule-based fallback takes over.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("[Summarizer] HTTP transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    #[error("[Summarizer] HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
        snippet: String,
    },

    #[error("[Summarizer] response decode error: {0}")]
    Decode(String),

    #[error("[Summarizer] completion contained no choices")]
    EmptyChoices,

    #[error("[Summarizer] invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Truncates an HTTP body for inclusion in errors and logs.
pub(crate) fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= SNIPPET_MAX {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(SNIPPET_MAX).collect();
    format!("{head}…")
}
