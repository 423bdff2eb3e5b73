//! Non-streaming OpenAI chat-completion client used for summaries.

use std::time::{Duration, Instant};

use answer_engine::Language;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::SummarizerConfig;
use crate::error_handler::{SummarizerError, make_snippet};

/// Thin client for `POST {endpoint}/v1/chat/completions`.
#[derive(Debug)]
pub(crate) struct OpenAiSummarizer {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
    url_chat: String,
}

impl OpenAiSummarizer {
    /// Builds the client with default headers and a timeout. Requires an
    /// API key; the caller decides what to do without one.
    pub(crate) fn new(cfg: &SummarizerConfig, api_key: &str) -> Result<Self, SummarizerError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(SummarizerError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| SummarizerError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_chat = format!("{base}/v1/chat/completions");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "OpenAI summarizer initialized"
        );

        Ok(Self {
            client,
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            url_chat,
        })
    }

    /// Requests a summary of `history` in the requested language.
    pub(crate) async fn summarize(
        &self,
        history: &str,
        language: Language,
    ) -> Result<String, SummarizerError> {
        let started = Instant::now();
        let (system, user) = prompts(history, language);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            model = %self.model,
            history_len = history.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );

            return Err(SummarizerError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            SummarizerError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(SummarizerError::EmptyChoices)?;

        info!(
            model = %self.model,
            latency_ms = started.elapsed().as_millis(),
            "chat summary completed"
        );

        Ok(content.trim().to_string())
    }
}

/// System and user prompts, localized to the conversation language.
fn prompts(history: &str, language: Language) -> (String, String) {
    match language {
        Language::Ar => (
            "أنت مساعد ذكي متخصص في تلخيص المحادثات المصرفية. قدم ملخصاً شاملاً ومفيداً."
                .to_string(),
            format!(
                "يرجى تقديم ملخص شامل ومختصر لهذه المحادثة المصرفية. ركز على:\n\
                 1. النقاط الرئيسية المناقشة\n\
                 2. الأسئلة المهمة المطروحة\n\
                 3. المعلومات والنصائح المقدمة\n\
                 4. أي قرارات أو خطوات تالية\n\nالمحادثة:\n{history}"
            ),
        ),
        Language::En => (
            "You are an AI assistant specialized in summarizing banking conversations. \
             Provide comprehensive and helpful summaries."
                .to_string(),
            format!(
                "Please provide a comprehensive and concise summary of this banking \
                 conversation. Focus on:\n\
                 1. Key topics discussed\n\
                 2. Important questions asked\n\
                 3. Information and advice provided\n\
                 4. Any decisions or next steps\n\nConversation:\n{history}"
            ),
        ),
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_carry_the_history_verbatim() {
        let (_, user) = prompts("User: hi\nAssistant: hello", Language::En);
        assert!(user.contains("User: hi\nAssistant: hello"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cfg = SummarizerConfig {
            endpoint: "ftp://example.com".into(),
            ..SummarizerConfig::default()
        };
        assert!(matches!(
            OpenAiSummarizer::new(&cfg, "sk-test"),
            Err(SummarizerError::InvalidEndpoint(_))
        ));
    }
}
