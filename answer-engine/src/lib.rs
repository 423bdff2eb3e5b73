//! Answer-resolution pipeline with a single public entry point.
//!
//! Public API: [`resolve_answer`]. For one incoming message it decides
//! whether to answer conversationally without a corpus lookup, which
//! upstream API generation to call (continue vs. start a session),
//! normalizes the raw payload into the canonical answer+sources shape,
//! and — when the upstream reports no usable information — synthesizes a
//! best-effort answer from the caller-supplied conversation history.
//!
//! The pipeline holds no state across requests; everything it needs
//! arrives in the [`ChatQuery`] and the injected collaborators.

mod api_types;
mod error;
mod fallback;
mod normalizer;
mod query;
mod smalltalk;
mod vocab;

pub use api_types::{AnswerResult, SourceRef};
pub use error::AnswerError;
pub use query::{ChatQuery, HistoryTurn, Language, Role};
pub use vocab::Vocabulary;

use rag_gateway::{VectaraClient, build_metadata_filter};

/// Resolves one chat message into a final answer.
///
/// Control flow: short-circuit detector → upstream call (continuing the
/// session named by `query.session_id`, or starting a new one) →
/// normalization, with the history-aware fallback folded into the
/// no-summary case. The two documented shape fallbacks live inside the
/// client; only a failure of the terminal legacy query surfaces here.
///
/// # Errors
/// Returns [`AnswerError::Gateway`] when the upstream service is
/// unreachable through every documented fallback.
pub async fn resolve_answer(
    client: &VectaraClient,
    query: &ChatQuery,
    vocab: &Vocabulary,
) -> Result<AnswerResult, AnswerError> {
    if let Some(canned) = smalltalk::greeting_reply(&query.text, query.language, vocab) {
        return Ok(AnswerResult::plain(canned, query.session_id.clone()));
    }

    let reply = match query.session_id.as_deref() {
        Some(session_id) => {
            client
                .continue_session(session_id, &query.text, query.language.as_str())
                .await?
        }
        None => {
            let filter = build_metadata_filter(&query.filters);
            client
                .start_session(&query.text, query.language.as_str(), &filter)
                .await?
        }
    };

    Ok(normalizer::normalize(&reply, query, vocab))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_gateway::GatewayConfig;

    fn mock_client() -> VectaraClient {
        VectaraClient::new(GatewayConfig::default()).expect("mock client")
    }

    #[tokio::test]
    async fn greeting_short_circuits_before_any_upstream_call() {
        let vocab = Vocabulary::default();
        let query = ChatQuery {
            text: "Hello".into(),
            ..ChatQuery::default()
        };
        let out = resolve_answer(&mock_client(), &query, &vocab)
            .await
            .expect("resolved");
        assert_eq!(out.answer_text, vocab.greeting_reply_en);
        assert!(out.sources.is_empty());
        assert!(out.session_id.is_none());
    }

    #[tokio::test]
    async fn arabic_greeting_gets_arabic_canned_reply() {
        let vocab = Vocabulary::default();
        let query = ChatQuery {
            text: "مرحبا".into(),
            language: Language::Ar,
            ..ChatQuery::default()
        };
        let out = resolve_answer(&mock_client(), &query, &vocab)
            .await
            .expect("resolved");
        assert_eq!(out.answer_text, vocab.greeting_reply_ar);
    }

    #[tokio::test]
    async fn new_conversation_takes_the_session_path() {
        let vocab = Vocabulary::default();
        let query = ChatQuery {
            text: "what are the capital adequacy rules?".into(),
            ..ChatQuery::default()
        };
        let out = resolve_answer(&mock_client(), &query, &vocab)
            .await
            .expect("resolved");
        // Mock session reply echoes the query and carries the mock id.
        assert!(out.answer_text.contains("capital adequacy"));
        assert_eq!(out.session_id.as_deref(), Some("chat_mock_00000001"));
    }

    #[tokio::test]
    async fn existing_session_is_continued() {
        let vocab = Vocabulary::default();
        let query = ChatQuery {
            text: "and for islamic banks?".into(),
            session_id: Some("cht_prev".into()),
            ..ChatQuery::default()
        };
        let out = resolve_answer(&mock_client(), &query, &vocab)
            .await
            .expect("resolved");
        assert!(out.answer_text.contains("islamic banks"));
    }
}
