//! Unified error handling for `rag-gateway`.
//!
//! One top-level error type [`RagGatewayError`] for the whole crate, with
//! config-time problems grouped in [`ConfigError`]. Transport and HTTP
//! failures reaching the hosted service are what the rest of the system
//! treats as "upstream unavailable".
//!
//! All messages include the suffix `[RAG Gateway]` to simplify attribution
//! in logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, RagGatewayError>;

/// Top-level error for the `rag-gateway` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RagGatewayError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[RAG Gateway] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[RAG Gateway] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[RAG Gateway] decode error: {0}")]
    Decode(String),
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (timeouts, limits).
    #[error("[RAG Gateway] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `VECTARA_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[RAG Gateway] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `VECTARA_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            RagGatewayError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start
/// with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Trims a response body to a short, single-line snippet for logs/errors.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 240;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() > MAX {
        let mut cut = MAX;
        while !flat.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &flat[..cut])
    } else {
        flat
    }
}
