//! Conversation summaries with an OpenAI-backed primary path and a
//! rule-based fallback.
//!
//! [`SummaryService::summarize`] never fails: a missing API key keeps the
//! service in rule-based mode, and any remote failure is logged and
//! falls back to the same basic summary.

mod config;
mod error_handler;
mod openai;
mod simple;

pub use config::SummarizerConfig;
pub use error_handler::SummarizerError;

use answer_engine::Language;
use tracing::warn;

/// Summarizes chat transcripts.
#[derive(Debug)]
pub struct SummaryService {
    openai: Option<openai::OpenAiSummarizer>,
}

impl SummaryService {
    /// Builds the service. Without an API key the OpenAI path is disabled
    /// and only the rule-based summarizer runs.
    pub fn new(cfg: SummarizerConfig) -> Result<Self, SummarizerError> {
        let openai = match cfg.api_key.as_deref() {
            Some(key) => Some(openai::OpenAiSummarizer::new(&cfg, key)?),
            None => None,
        };
        Ok(Self { openai })
    }

    /// Builds the service from environment variables.
    pub fn from_env() -> Result<Self, SummarizerError> {
        Self::new(SummarizerConfig::from_env())
    }

    /// Whether the OpenAI path is configured.
    pub fn has_remote(&self) -> bool {
        self.openai.is_some()
    }

    /// Summarizes a `User:`/`Assistant:` transcript in the given language.
    pub async fn summarize(&self, history: &str, language: Language) -> String {
        if let Some(openai) = &self.openai {
            match openai.summarize(history, language).await {
                Ok(summary) => return summary,
                Err(error) => {
                    warn!(%error, "remote summarization failed, using rule-based summary");
                }
            }
        }
        simple::simple_summary(history, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_api_key_the_rule_based_path_answers() {
        let service = SummaryService::new(SummarizerConfig::default()).unwrap();
        assert!(!service.has_remote());
        let summary = service
            .summarize("User: tell me about loan limits", Language::En)
            .await;
        assert!(summary.contains("Questions asked: 1"));
    }
}
