//! Wire payloads of the two upstream protocol generations.
//!
//! The upstream service answers with one of two JSON shapes depending on
//! which API generation handled the call. [`UpstreamReply`] models that as
//! a tagged union and [`UpstreamReply::classify`] discriminates explicitly
//! on the shape-identifying field (`id` for the session API, `responseSet`
//! for the legacy API) before any shape-specific field is touched. A
//! payload matching neither shape classifies as [`UpstreamReply::Unknown`];
//! classification never fails.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Reply of the session-oriented chat API (`/v2/chats`).
#[derive(Debug, Clone, Deserialize)]
pub struct SessionReply {
    /// Upstream session id; becomes the conversation id downstream.
    pub id: String,
    /// Conversation turns, oldest first. The latest turn carries the
    /// answer to the current query.
    #[serde(default)]
    pub turns: Vec<SessionTurn>,
}

/// One request/response pair within a chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTurn {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// Reply of the legacy query+summary API (`/v1/query`).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyReply {
    #[serde(rename = "responseSet", default)]
    pub response_set: Vec<ResultSet>,
}

/// One result set: search matches plus an optional generated summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub summary: Vec<SummaryItem>,
    #[serde(default)]
    pub response: Vec<SearchMatch>,
}

/// Generated summary entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryItem {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Vec<StatusItem>,
}

/// Status attached to a summary (e.g., the no-query-results code).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusItem {
    #[serde(default)]
    pub code: String,
}

/// One retrieved document excerpt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMatch {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Vec<MetaAttr>,
}

/// Name/value metadata attribute of a match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaAttr {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Tagged union over the two reply shapes.
#[derive(Debug, Clone)]
pub enum UpstreamReply {
    /// Session-oriented chat API shape.
    Session(SessionReply),
    /// Legacy query+summary API shape.
    Legacy(LegacyReply),
    /// Neither known shape; downstream degrades to a placeholder answer.
    Unknown,
}

impl UpstreamReply {
    /// Classifies a raw JSON payload into one of the known shapes.
    ///
    /// The session marker (`id`) wins when a payload could satisfy both
    /// shapes. Decode failures after a positive marker downgrade to
    /// [`UpstreamReply::Unknown`] with a warning; this function never
    /// errors.
    pub fn classify(raw: Value) -> Self {
        if raw.get("id").and_then(Value::as_str).is_some() {
            return match serde_json::from_value::<SessionReply>(raw) {
                Ok(reply) => Self::Session(reply),
                Err(e) => {
                    warn!(error = %e, "session-marked payload failed to decode");
                    Self::Unknown
                }
            };
        }

        if raw.get("responseSet").is_some_and(Value::is_array) {
            return match serde_json::from_value::<LegacyReply>(raw) {
                Ok(reply) => Self::Legacy(reply),
                Err(e) => {
                    warn!(error = %e, "legacy-marked payload failed to decode");
                    Self::Unknown
                }
            };
        }

        Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_session_shape() {
        let raw = json!({
            "id": "cht_123",
            "turns": [{"id": "trn_1", "query": "q", "answer": "a"}]
        });
        match UpstreamReply::classify(raw) {
            UpstreamReply::Session(s) => {
                assert_eq!(s.id, "cht_123");
                assert_eq!(s.turns.len(), 1);
                assert_eq!(s.turns[0].answer.as_deref(), Some("a"));
            }
            other => panic!("expected session shape, got {other:?}"),
        }
    }

    #[test]
    fn classifies_legacy_shape() {
        let raw = json!({
            "responseSet": [{
                "summary": [{"text": "summary text", "status": []}],
                "response": [{"text": "excerpt", "score": 0.9,
                              "metadata": [{"name": "source", "value": "doc.pdf"}]}]
            }]
        });
        match UpstreamReply::classify(raw) {
            UpstreamReply::Legacy(l) => {
                assert_eq!(l.response_set.len(), 1);
                assert_eq!(
                    l.response_set[0].summary[0].text.as_deref(),
                    Some("summary text")
                );
            }
            other => panic!("expected legacy shape, got {other:?}"),
        }
    }

    #[test]
    fn session_marker_wins_on_ambiguity() {
        // A payload carrying both markers resolves to the session shape.
        let raw = json!({
            "id": "cht_9",
            "turns": [{"answer": "session answer"}],
            "responseSet": [{"summary": [{"text": "legacy summary"}], "response": []}]
        });
        assert!(matches!(
            UpstreamReply::classify(raw),
            UpstreamReply::Session(_)
        ));
    }

    #[test]
    fn unknown_for_anything_else() {
        assert!(matches!(
            UpstreamReply::classify(json!({"hello": "world"})),
            UpstreamReply::Unknown
        ));
        assert!(matches!(
            UpstreamReply::classify(json!(42)),
            UpstreamReply::Unknown
        ));
    }
}
