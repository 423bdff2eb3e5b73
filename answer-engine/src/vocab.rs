//! Keyword tables and canned texts used by the pipeline.
//!
//! These are configuration data, not logic: greetings, recall phrases,
//! the banking-domain vocabulary, canned answers, and the upstream
//! sentinel values all live here so tests can parametrize them and
//! deployments can localize or retune them without code changes. A JSON
//! file referenced by `ANSWER_VOCAB_PATH` overrides any subset of fields.

use serde::Deserialize;
use tracing::warn;

/// Data tables driving the detector, normalizer, and fallback synthesizer.
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    /// Greeting/small-talk tokens, matched as lower-case substrings.
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,

    /// Canned greeting reply, English.
    #[serde(default = "default_greeting_reply_en")]
    pub greeting_reply_en: String,

    /// Canned greeting reply, Arabic.
    #[serde(default = "default_greeting_reply_ar")]
    pub greeting_reply_ar: String,

    /// Meta-conversational phrases that trigger the recall strategy.
    #[serde(default = "default_recall_phrases")]
    pub recall_phrases: Vec<String>,

    /// Banking-domain keywords used for topic extraction.
    #[serde(default = "default_banking_keywords")]
    pub banking_keywords: Vec<String>,

    /// Generic placeholder answer when the upstream gives nothing usable.
    #[serde(default = "default_placeholder_answer")]
    pub placeholder_answer: String,

    /// Fixed apology returned when the corpus has no documents yet.
    #[serde(default = "default_empty_corpus_answer")]
    pub empty_corpus_answer: String,

    /// Upstream sentinel string meaning "summary carries no information".
    #[serde(default = "default_insufficient_info_sentinel")]
    pub insufficient_info_sentinel: String,

    /// Upstream status code meaning "the query produced no results".
    /// Service-version specific, hence data rather than a literal.
    #[serde(default = "default_no_results_status_code")]
    pub no_results_status_code: String,
}

impl Vocabulary {
    /// Loads overrides from the JSON file named by `ANSWER_VOCAB_PATH`,
    /// falling back to the built-in tables when the variable is unset or
    /// the file cannot be read/parsed (logged, never fatal).
    pub fn from_env_or_default() -> Self {
        let Ok(path) = std::env::var("ANSWER_VOCAB_PATH") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(vocab) => vocab,
                Err(e) => {
                    warn!(%path, error = %e, "vocabulary file invalid, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(%path, error = %e, "vocabulary file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Canned greeting for the requested language.
    pub fn greeting_reply(&self, language: crate::query::Language) -> &str {
        match language {
            crate::query::Language::En => &self.greeting_reply_en,
            crate::query::Language::Ar => &self.greeting_reply_ar,
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            greetings: default_greetings(),
            greeting_reply_en: default_greeting_reply_en(),
            greeting_reply_ar: default_greeting_reply_ar(),
            recall_phrases: default_recall_phrases(),
            banking_keywords: default_banking_keywords(),
            placeholder_answer: default_placeholder_answer(),
            empty_corpus_answer: default_empty_corpus_answer(),
            insufficient_info_sentinel: default_insufficient_info_sentinel(),
            no_results_status_code: default_no_results_status_code(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_greetings() -> Vec<String> {
    strings(&[
        "hello",
        "hi",
        "hey",
        "good morning",
        "good afternoon",
        "good evening",
        "how are you",
        "what's up",
        "greetings",
        "salaam",
        "marhaba",
        "ahlan",
        "كيف حالك",
        "مرحبا",
        "أهلا",
        "السلام عليكم",
        "صباح الخير",
        "مساء الخير",
    ])
}

fn default_greeting_reply_en() -> String {
    "Hello! I'm the bank's AI assistant. I'm here to help you with banking \
     regulations, policies, and general banking information. How can I assist \
     you today?"
        .to_string()
}

fn default_greeting_reply_ar() -> String {
    "مرحباً! أنا المساعد المصرفي الذكي. أنا هنا لمساعدتك في اللوائح المصرفية \
     والسياسات والمعلومات المصرفية العامة. كيف يمكنني مساعدتك اليوم؟"
        .to_string()
}

fn default_recall_phrases() -> Vec<String> {
    strings(&[
        "remember",
        "what did i",
        "previous",
        "earlier",
        "before",
        "what was the question",
        "what was my question",
        "last question",
    ])
}

fn default_banking_keywords() -> Vec<String> {
    strings(&[
        "loan",
        "bank",
        "regulation",
        "policy",
        "interest",
        "credit",
        "finance",
        "money",
        "currency",
        "payment",
    ])
}

fn default_placeholder_answer() -> String {
    "I'm here to help with your banking queries.".to_string()
}

fn default_empty_corpus_answer() -> String {
    "I apologize, but I don't have any documents in my knowledge base yet to \
     answer your question. Please upload some documents first, or contact your \
     administrator to populate the system with relevant banking documents."
        .to_string()
}

fn default_insufficient_info_sentinel() -> String {
    "I do not have enough information.".to_string()
}

fn default_no_results_status_code() -> String {
    "QRY__SMRY__NO_QUERY_RESULTS".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_override_keeps_other_defaults() {
        let vocab: Vocabulary =
            serde_json::from_str(r#"{"no_results_status_code": "NEW_CODE"}"#).unwrap();
        assert_eq!(vocab.no_results_status_code, "NEW_CODE");
        assert_eq!(
            vocab.insufficient_info_sentinel,
            "I do not have enough information."
        );
        assert!(vocab.greetings.iter().any(|g| g == "hello"));
    }
}
