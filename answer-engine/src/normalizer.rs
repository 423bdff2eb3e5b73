//! Response normalizer: raw upstream payload → canonical [`AnswerResult`].
//!
//! Resolution order over the tagged payload union, first match wins:
//! 1. session shape, last turn has a non-empty answer → that text verbatim
//! 2. session shape otherwise → placeholder (warning logged)
//! 3. legacy shape with a real summary (not the insufficient-information
//!    sentinel) → summary text + up to three sources
//! 4. legacy shape whose summary status equals the no-query-results code →
//!    fixed empty-knowledge-base apology, `corpus_empty` set
//! 5. legacy shape with no usable summary → history-aware fallback
//! Unknown shape → placeholder. This function never fails.

use std::collections::HashMap;

use rag_gateway::UpstreamReply;
use rag_gateway::payloads::{ResultSet, SearchMatch};
use tracing::warn;

use crate::api_types::{AnswerResult, SourceRef};
use crate::fallback;
use crate::query::ChatQuery;
use crate::vocab::Vocabulary;

/// Maximum number of sources surfaced to the caller.
const MAX_SOURCES: usize = 3;

/// Maximum excerpt length before the ellipsis marker.
const EXCERPT_CHARS: usize = 200;

/// Normalizes a raw upstream reply into the canonical answer structure.
pub fn normalize(reply: &UpstreamReply, query: &ChatQuery, vocab: &Vocabulary) -> AnswerResult {
    match reply {
        UpstreamReply::Session(session) => {
            let answer = session
                .turns
                .last()
                .and_then(|turn| turn.answer.as_deref())
                .filter(|text| !text.trim().is_empty());

            match answer {
                Some(text) => AnswerResult::plain(text, Some(session.id.clone())),
                None => {
                    warn!(session_id = %session.id, "no answer in chat turns");
                    AnswerResult::plain(&vocab.placeholder_answer, Some(session.id.clone()))
                }
            }
        }

        UpstreamReply::Legacy(legacy) => {
            let Some(set) = legacy.response_set.first() else {
                warn!("legacy reply with empty response set");
                return AnswerResult::plain(&vocab.placeholder_answer, query.session_id.clone());
            };
            normalize_result_set(set, query, vocab)
        }

        UpstreamReply::Unknown => {
            warn!("upstream payload matched neither known shape");
            AnswerResult::plain(&vocab.placeholder_answer, query.session_id.clone())
        }
    }
}

fn normalize_result_set(set: &ResultSet, query: &ChatQuery, vocab: &Vocabulary) -> AnswerResult {
    let summary = set.summary.first();

    let summary_text = summary
        .and_then(|s| s.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != vocab.insufficient_info_sentinel);

    if let Some(text) = summary_text {
        return AnswerResult {
            answer_text: text.to_string(),
            session_id: query.session_id.clone(),
            sources: collect_sources(&set.response),
            corpus_empty: false,
        };
    }

    let no_results = summary
        .and_then(|s| s.status.first())
        .is_some_and(|status| status.code == vocab.no_results_status_code);

    if no_results {
        warn!("empty corpus, no documents available for search");
        return AnswerResult {
            answer_text: vocab.empty_corpus_answer.clone(),
            session_id: query.session_id.clone(),
            sources: Vec::new(),
            corpus_empty: true,
        };
    }

    warn!("no usable summary in legacy reply, synthesizing from history");
    AnswerResult::plain(fallback::synthesize(query, vocab), query.session_id.clone())
}

fn collect_sources(matches: &[SearchMatch]) -> Vec<SourceRef> {
    matches
        .iter()
        .take(MAX_SOURCES)
        .map(|m| SourceRef {
            excerpt: truncate_excerpt(&m.text),
            relevance_score: m.score,
            attributes: flatten_attributes(m),
        })
        .collect()
}

fn flatten_attributes(m: &SearchMatch) -> HashMap<String, String> {
    // Last value wins on duplicate names.
    m.metadata
        .iter()
        .map(|attr| (attr.name.clone(), attr.value.clone()))
        .collect()
}

fn truncate_excerpt(text: &str) -> String {
    let mut excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_gateway::UpstreamReply;
    use serde_json::json;

    fn classify(v: serde_json::Value) -> UpstreamReply {
        UpstreamReply::classify(v)
    }

    fn query() -> ChatQuery {
        ChatQuery {
            text: "what are the loan limits?".into(),
            ..ChatQuery::default()
        }
    }

    #[test]
    fn session_answer_used_verbatim_without_sources() {
        let reply = classify(json!({
            "id": "cht_1",
            "turns": [
                {"answer": "older answer"},
                {"answer": "Loans are capped at 60% of income."}
            ]
        }));
        let out = normalize(&reply, &query(), &Vocabulary::default());
        assert_eq!(out.answer_text, "Loans are capped at 60% of income.");
        assert_eq!(out.session_id.as_deref(), Some("cht_1"));
        assert!(out.sources.is_empty());
    }

    #[test]
    fn session_without_turns_falls_to_placeholder() {
        let vocab = Vocabulary::default();
        let reply = classify(json!({"id": "cht_2", "turns": []}));
        let out = normalize(&reply, &query(), &vocab);
        assert_eq!(out.answer_text, vocab.placeholder_answer);
        assert_eq!(out.session_id.as_deref(), Some("cht_2"));
    }

    #[test]
    fn session_marker_wins_when_both_shapes_present() {
        // Shape ambiguity: a payload satisfying case 1 and case 3 at once.
        let reply = classify(json!({
            "id": "cht_3",
            "turns": [{"answer": "session wins"}],
            "responseSet": [{"summary": [{"text": "legacy loses"}], "response": []}]
        }));
        let out = normalize(&reply, &query(), &Vocabulary::default());
        assert_eq!(out.answer_text, "session wins");
    }

    #[test]
    fn legacy_summary_with_sources() {
        let reply = classify(json!({
            "responseSet": [{
                "summary": [{"text": "Summary of the regulation.", "status": []}],
                "response": [
                    {"text": "first", "score": 0.9,
                     "metadata": [{"name": "source", "value": "a.pdf"},
                                  {"name": "source", "value": "b.pdf"}]},
                    {"text": "second", "score": 0.8, "metadata": []},
                    {"text": "third", "score": 0.7, "metadata": []},
                    {"text": "fourth", "score": 0.6, "metadata": []}
                ]
            }]
        }));
        let out = normalize(&reply, &query(), &Vocabulary::default());
        assert_eq!(out.answer_text, "Summary of the regulation.");
        // Cap at three, upstream order preserved.
        assert_eq!(out.sources.len(), 3);
        assert_eq!(out.sources[0].excerpt, "first...");
        assert_eq!(out.sources[2].excerpt, "third...");
        // Duplicate attribute names: last value wins.
        assert_eq!(out.sources[0].attributes["source"], "b.pdf");
    }

    #[test]
    fn long_excerpts_truncate_to_200_chars() {
        let long = "x".repeat(500);
        let reply = classify(json!({
            "responseSet": [{
                "summary": [{"text": "s"}],
                "response": [{"text": long, "score": 0.5, "metadata": []}]
            }]
        }));
        let out = normalize(&reply, &query(), &Vocabulary::default());
        assert_eq!(out.sources[0].excerpt.chars().count(), 203);
        assert!(out.sources[0].excerpt.ends_with("..."));
    }

    #[test]
    fn no_results_code_yields_empty_corpus_apology() {
        let vocab = Vocabulary::default();
        let reply = classify(json!({
            "responseSet": [{
                "summary": [{
                    "text": "I do not have enough information.",
                    "status": [{"code": "QRY__SMRY__NO_QUERY_RESULTS"}]
                }],
                "response": []
            }]
        }));
        let out = normalize(&reply, &query(), &vocab);
        assert_eq!(out.answer_text, vocab.empty_corpus_answer);
        assert!(out.sources.is_empty());
        assert!(out.corpus_empty);
    }

    #[test]
    fn sentinel_summary_without_code_goes_to_fallback() {
        let vocab = Vocabulary::default();
        let reply = classify(json!({
            "responseSet": [{
                "summary": [{"text": "I do not have enough information.", "status": []}],
                "response": []
            }]
        }));
        let out = normalize(&reply, &query(), &vocab);
        assert_ne!(out.answer_text, vocab.empty_corpus_answer);
        assert_ne!(out.answer_text, vocab.placeholder_answer);
        assert!(!out.corpus_empty);
    }

    #[test]
    fn unknown_shape_never_fails() {
        let vocab = Vocabulary::default();
        let out = normalize(&classify(json!({"weird": true})), &query(), &vocab);
        assert_eq!(out.answer_text, vocab.placeholder_answer);
        assert!(out.sources.is_empty());
    }
}
