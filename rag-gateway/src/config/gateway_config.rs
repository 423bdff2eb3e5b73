//! Gateway configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `VECTARA_CUSTOMER_ID` — upstream customer id (optional)
//! - `VECTARA_CORPUS_ID`   — corpus to search/ingest into (optional)
//! - `VECTARA_API_KEY`     — api key (optional)
//! - `VECTARA_BASE_URL`    — service base URL (default `https://api.vectara.io`)
//! - `VECTARA_TIMEOUT_SECS` — request timeout in seconds (optional)
//!
//! The three credential values are deliberately optional: when any of them
//! is missing the client enters mock mode instead of failing at startup.

use crate::error_handler::{Result, env_opt_u64};

/// Default base URL of the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://api.vectara.io";

/// Configuration for [`crate::VectaraClient`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream customer id.
    pub customer_id: Option<String>,

    /// Corpus id queried and ingested into.
    pub corpus_id: Option<String>,

    /// API key sent as the `x-api-key` header.
    pub api_key: Option<String>,

    /// Service base URL.
    pub base_url: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Number of matches requested per query.
    pub num_results: u32,

    /// Number of matches the upstream summarizer may use.
    pub max_summarized_results: u32,

    /// Upstream summarizer prompt name.
    pub summarizer_prompt: String,
}

impl GatewayConfig {
    /// Builds the config from environment variables.
    ///
    /// # Errors
    /// Returns a config error only when `VECTARA_TIMEOUT_SECS` is set but
    /// not a valid number; missing credentials are not an error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            customer_id: env_opt("VECTARA_CUSTOMER_ID"),
            corpus_id: env_opt("VECTARA_CORPUS_ID"),
            api_key: env_opt("VECTARA_API_KEY"),
            base_url: env_opt("VECTARA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: env_opt_u64("VECTARA_TIMEOUT_SECS")?,
            num_results: 10,
            max_summarized_results: 5,
            summarizer_prompt: "vectara-summary-ext-24-05-sml".to_string(),
        })
    }

    /// True when customer id, corpus id, and api key are all present.
    pub fn has_credentials(&self) -> bool {
        self.customer_id.is_some() && self.corpus_id.is_some() && self.api_key.is_some()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            customer_id: None,
            corpus_id: None,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            num_results: 10,
            max_summarized_results: 5,
            summarizer_prompt: "vectara-summary-ext-24-05-sml".to_string(),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
