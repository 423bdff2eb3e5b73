//! History-aware fallback synthesizer.
//!
//! Invoked when the upstream search already failed to produce a usable
//! summary. Trades the flat "no results" outcome for a best-effort,
//! context-aware reply built from the caller-supplied history. This is a
//! keyword heuristic, not semantic understanding; it sits in front of a
//! retrieval service whose search came up empty, so best effort is the
//! contract.

use crate::query::{ChatQuery, Role};
use crate::vocab::Vocabulary;

/// Prior user questions quoted by the recall strategy.
const MAX_RECALLED_QUESTIONS: usize = 3;

/// Distinct topics named by the contextual strategy.
const MAX_NAMED_TOPICS: usize = 3;

/// History window (entries, both roles) scanned for recent topics.
const TOPIC_WINDOW: usize = 6;

/// Synthesizes an answer from the query text and conversation history.
///
/// Selects exactly one of two strategies: **recall** when the text
/// contains a meta-conversational phrase, **contextual-topic** otherwise.
pub fn synthesize(query: &ChatQuery, vocab: &Vocabulary) -> String {
    let lowered = query.text.to_lowercase();

    if vocab.recall_phrases.iter().any(|p| lowered.contains(p.as_str())) {
        recall_reply(query, &lowered)
    } else {
        contextual_reply(query, &lowered, vocab)
    }
}

/// Quotes up to three prior user questions, excluding the current one.
fn recall_reply(query: &ChatQuery, lowered: &str) -> String {
    let current = lowered.trim();

    let mut questions: Vec<&str> = Vec::new();
    for turn in query.history.iter().rev() {
        if turn.role != Role::User {
            continue;
        }
        let content = turn.content.trim();
        if content.is_empty() || content.to_lowercase() == current {
            continue;
        }
        questions.push(content);
        if questions.len() >= MAX_RECALLED_QUESTIONS {
            break;
        }
    }

    if questions.is_empty() {
        return "This appears to be the beginning of our conversation. What would \
                you like to know about central bank services, banking regulations, \
                or financial policies?"
            .to_string();
    }

    let mut reply = if questions.len() == 1 {
        format!("Your most recent question was: \"{}\"", questions[0])
    } else {
        let list = questions
            .iter()
            .map(|q| format!("- \"{q}\""))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Your recent questions were:\n{list}")
    };
    reply.push_str("\n\nWould you like me to elaborate on any of these topics?");
    reply
}

/// Acknowledges banking topics in the text and/or names topics from
/// recent history; degrades to the generic apology when neither applies.
fn contextual_reply(query: &ChatQuery, lowered: &str, vocab: &Vocabulary) -> String {
    let mut contextual: Option<String> = None;

    if vocab.banking_keywords.iter().any(|k| lowered.contains(k.as_str())) {
        contextual = Some(format!(
            "I understand you're asking about banking topics, but I don't have \
             specific information about '{}' in my current knowledge base.",
            query.text
        ));
    }

    let recent_topics = recent_user_topics(query, vocab);
    if !recent_topics.is_empty() && recent_topics.iter().any(|t| lowered.contains(t.as_str())) {
        let named = recent_topics
            .iter()
            .take(MAX_NAMED_TOPICS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        contextual = Some(format!(
            "I see you're following up on topics we discussed earlier. While I \
             don't have specific information about '{}', we were talking about \
             {named}. Could you be more specific about what aspect you'd like to \
             know?",
            query.text
        ));
    }

    match contextual {
        Some(text) => format!(
            "{text}\n\nI'm here to help with central bank services, banking \
             regulations, policies, and loan information. Could you rephrase your \
             question or provide more context?"
        ),
        None => "I don't have specific information about that topic in my current \
                 knowledge base. However, I'm here to help with banking \
                 regulations, policies, loan information, and other central bank \
                 services. Could you please rephrase your question or ask about a \
                 banking-related topic?"
            .to_string(),
    }
}

/// Distinct banking keywords mentioned by the user in the last few
/// history entries, in first-mention order.
fn recent_user_topics(query: &ChatQuery, vocab: &Vocabulary) -> Vec<String> {
    let window_start = query.history.len().saturating_sub(TOPIC_WINDOW);
    let mut topics: Vec<String> = Vec::new();

    for turn in &query.history[window_start..] {
        if turn.role != Role::User {
            continue;
        }
        let content = turn.content.to_lowercase();
        for keyword in &vocab.banking_keywords {
            if content.contains(keyword.as_str()) && !topics.contains(keyword) {
                topics.push(keyword.clone());
            }
        }
    }

    topics
}
