//! Rule-based summary used when no OpenAI key is configured or the
//! remote call fails.

use answer_engine::Language;

/// Keywords counted as discussion topics in the basic summary.
const TOPIC_KEYWORDS: [&str; 8] = [
    "loan", "credit", "bank", "account", "payment", "interest", "mortgage", "finance",
];

const MAX_TOPICS: usize = 5;

/// Builds a basic statistics summary from a `User:`/`Assistant:` transcript.
pub(crate) fn simple_summary(history: &str, language: Language) -> String {
    let lines: Vec<&str> = history.lines().collect();
    let user_count = lines.iter().filter(|l| l.starts_with("User:")).count();
    let ai_count = lines.iter().filter(|l| l.starts_with("Assistant:")).count();

    let mut topics: Vec<&str> = Vec::new();
    for line in &lines {
        let lowered = line.to_lowercase();
        for keyword in TOPIC_KEYWORDS {
            if lowered.contains(keyword) && !topics.contains(&keyword) {
                topics.push(keyword);
            }
        }
    }
    topics.truncate(MAX_TOPICS);

    match language {
        Language::Ar => {
            let mut summary = String::from("ملخص المحادثة:\n\n");
            summary.push_str(&format!("• عدد الأسئلة المطروحة: {user_count}\n"));
            summary.push_str(&format!("• عدد الردود المقدمة: {ai_count}\n"));
            if !topics.is_empty() {
                summary.push_str(&format!("• المواضيع المناقشة: {}\n", topics.join(", ")));
            }
            summary.push_str(
                "\nهذا ملخص أساسي للمحادثة. للحصول على ملخص أكثر تفصيلاً، يرجى إعداد مفتاح OpenAI API.",
            );
            summary
        }
        Language::En => {
            let mut summary = String::from("Conversation Summary:\n\n");
            summary.push_str(&format!("• Questions asked: {user_count}\n"));
            summary.push_str(&format!("• Responses provided: {ai_count}\n"));
            if !topics.is_empty() {
                summary.push_str(&format!("• Topics discussed: {}\n", topics.join(", ")));
            }
            summary.push_str(
                "\nThis is a basic summary. For more detailed summaries, please configure OpenAI API key.",
            );
            summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_turns_and_lists_topics() {
        let history = "User: what is the loan cap?\n\
                       Assistant: The loan cap depends on the bank.\n\
                       User: and credit card interest?\n\
                       Assistant: Interest rates are regulated.";
        let summary = simple_summary(history, Language::En);
        assert!(summary.contains("Questions asked: 2"));
        assert!(summary.contains("Responses provided: 2"));
        assert!(summary.contains("loan"));
        assert!(summary.contains("credit"));
    }

    #[test]
    fn topics_are_capped_and_deduplicated() {
        let history = "User: loan loan credit bank account payment interest mortgage finance";
        let summary = simple_summary(history, Language::En);
        let topics_line = summary
            .lines()
            .find(|l| l.starts_with("• Topics discussed"))
            .unwrap();
        assert_eq!(topics_line.matches(',').count(), 4);
    }

    #[test]
    fn arabic_summary_is_localized() {
        let summary = simple_summary("User: مرحبا", Language::Ar);
        assert!(summary.starts_with("ملخص المحادثة:"));
    }
}
