//! Summarizer configuration, environment-driven.

const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Settings for the OpenAI-backed conversation summarizer.
///
/// `api_key` is optional: without it the service stays in rule-based
/// mode and never touches the network.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

impl SummarizerConfig {
    /// Reads `OPENAI_API_KEY`, `OPENAI_ENDPOINT`, `OPENAI_MODEL`, and
    /// `SUMMARIZER_TIMEOUT_SECS`. Unset variables keep their defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        if let Ok(endpoint) = std::env::var("OPENAI_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                cfg.endpoint = endpoint;
            }
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                cfg.model = model;
            }
        }
        cfg.timeout_secs = std::env::var("SUMMARIZER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok());
        cfg
    }
}
