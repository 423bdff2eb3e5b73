//! Conversational short-circuit detector.
//!
//! Greeting/small-talk messages are answered directly, without touching
//! the corpus. The word-count guard keeps longer messages that merely
//! contain a greeting word on the retrieval path.

use crate::query::Language;
use crate::vocab::Vocabulary;

/// Maximum word count for a message to qualify as pure small talk.
const MAX_SMALLTALK_WORDS: usize = 5;

/// Returns the canned greeting when `text` is small talk, `None` otherwise.
///
/// Matches the lower-cased text against the greeting table as substrings
/// and requires a word count of at most five. No side effects; never fails.
pub fn greeting_reply(text: &str, language: Language, vocab: &Vocabulary) -> Option<String> {
    let lowered = text.to_lowercase();
    let is_greeting = vocab.greetings.iter().any(|token| lowered.contains(token.as_str()));
    if is_greeting && text.split_whitespace().count() <= MAX_SMALLTALK_WORDS {
        Some(vocab.greeting_reply(language).to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_greeting_triggers() {
        let vocab = Vocabulary::default();
        let reply = greeting_reply("Hello", Language::En, &vocab);
        assert_eq!(reply.as_deref(), Some(vocab.greeting_reply_en.as_str()));
    }

    #[test]
    fn arabic_greeting_gets_arabic_reply() {
        let vocab = Vocabulary::default();
        let reply = greeting_reply("مرحبا", Language::Ar, &vocab);
        assert_eq!(reply.as_deref(), Some(vocab.greeting_reply_ar.as_str()));
    }

    #[test]
    fn long_message_with_greeting_word_does_not_trigger() {
        let vocab = Vocabulary::default();
        let text = "hello I would like to know the current reserve requirements";
        assert!(greeting_reply(text, Language::En, &vocab).is_none());
    }

    #[test]
    fn five_word_boundary() {
        let vocab = Vocabulary::default();
        assert!(greeting_reply("hi there how are you", Language::En, &vocab).is_some());
        assert!(greeting_reply("hi there how are you today", Language::En, &vocab).is_none());
    }

    #[test]
    fn non_greeting_is_ignored() {
        let vocab = Vocabulary::default();
        assert!(greeting_reply("loan limits", Language::En, &vocab).is_none());
    }
}
