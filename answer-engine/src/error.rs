//! Typed error for the answer-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    /// Errors from the upstream gateway. The pipeline only surfaces these
    /// when the terminal legacy-query fallback itself failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] rag_gateway::RagGatewayError),
}
