//! Thin client for the hosted RAG service.
//!
//! Endpoints are derived from `GatewayConfig::base_url`:
//! - POST {base}/v2/chats             — start a chat session
//! - POST {base}/v2/chats/{id}/turns  — continue a chat session
//! - POST {base}/v1/query             — legacy query + summary
//! - POST {base}/v1/index             — document ingestion
//!
//! Degradation chain (fixed by design, no retry/backoff beyond it):
//! - `continue_session` failure falls back to `start_session` (continuity
//!   is lost, the caller gets a fresh session id),
//! - `start_session` failure falls back to `query_legacy`,
//! - `query_legacy` failures propagate to the caller.
//!
//! Mock mode is decided once in the constructor and never flips per call.

use std::time::{Duration, Instant};

use reqwest::header;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::{
    config::gateway_config::GatewayConfig,
    error_handler::{RagGatewayError, Result, make_snippet, validate_http_endpoint},
    mock,
    payloads::UpstreamReply,
};

/// Client for the hosted RAG service.
///
/// Constructed from a complete [`GatewayConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout and default headers, including
/// the credential headers when present).
#[derive(Debug)]
pub struct VectaraClient {
    client: reqwest::Client,
    cfg: GatewayConfig,
    mock_mode: bool,
    url_chats: String,
    url_query: String,
    url_index: String,
}

impl VectaraClient {
    /// Creates a new [`VectaraClient`] from the given config.
    ///
    /// When the credentials are incomplete the client enters mock mode
    /// permanently; this is logged once here and is observable through
    /// [`VectaraClient::mock_mode`].
    ///
    /// # Errors
    /// - [`RagGatewayError::Config`] if the base URL has no http/https scheme
    /// - [`RagGatewayError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let base = cfg.base_url.trim();
        validate_http_endpoint("VECTARA_BASE_URL", base)?;

        let mock_mode = !cfg.has_credentials();
        if mock_mode {
            warn!(
                customer_id = cfg.customer_id.is_some(),
                corpus_id = cfg.corpus_id.is_some(),
                api_key = cfg.api_key.is_some(),
                "credentials not fully configured, running in mock mode"
            );
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(customer_id) = cfg.customer_id.as_deref() {
            headers.insert(
                "customer-id",
                header::HeaderValue::from_str(customer_id).map_err(|e| {
                    RagGatewayError::Decode(format!("invalid customer-id header: {e}"))
                })?,
            );
        }
        if let Some(api_key) = cfg.api_key.as_deref() {
            headers.insert(
                "x-api-key",
                header::HeaderValue::from_str(api_key).map_err(|e| {
                    RagGatewayError::Decode(format!("invalid x-api-key header: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = base.trim_end_matches('/').to_string();
        let url_chats = format!("{base}/v2/chats");
        let url_query = format!("{base}/v1/query");
        let url_index = format!("{base}/v1/index");

        info!(
            base_url = %cfg.base_url,
            mock_mode,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "VectaraClient initialized"
        );

        Ok(Self {
            client,
            cfg,
            mock_mode,
            url_chats,
            url_query,
            url_index,
        })
    }

    /// Convenience constructor reading config from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Whether this client fabricates payloads locally.
    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }

    /// Starts a new chat session with the given query.
    ///
    /// On transport/HTTP failure this falls back to [`Self::query_legacy`]
    /// with the same text, language, and filter instead of propagating.
    pub async fn start_session(
        &self,
        query_text: &str,
        language: &str,
        metadata_filter: &str,
    ) -> Result<UpstreamReply> {
        if self.mock_mode {
            return Ok(UpstreamReply::classify(mock::session_reply(query_text)));
        }

        let body = json!({
            "query": query_text,
            "search": {
                "corpora": [{
                    "customer_id": self.numeric_id(self.cfg.customer_id.as_deref()),
                    "corpus_id": self.numeric_id(self.cfg.corpus_id.as_deref()),
                    "metadata_filter": metadata_filter,
                }],
                "limit": self.cfg.num_results,
            },
            "generation": self.generation_block(language),
        });

        match self.post_json(&self.url_chats, &body).await {
            Ok(raw) => {
                info!(query_len = query_text.len(), "chat session created");
                Ok(UpstreamReply::classify(raw))
            }
            Err(e) => {
                warn!(error = %e, "chat session creation failed, falling back to legacy query");
                self.query_legacy(query_text, language, metadata_filter)
                    .await
            }
        }
    }

    /// Adds a turn to an existing chat session.
    ///
    /// On transport/HTTP failure this falls back to [`Self::start_session`]
    /// (conversation continuity is lost) instead of propagating.
    pub async fn continue_session(
        &self,
        session_id: &str,
        query_text: &str,
        language: &str,
    ) -> Result<UpstreamReply> {
        if self.mock_mode {
            return Ok(UpstreamReply::classify(mock::session_reply(query_text)));
        }

        let url = format!("{}/{}/turns", self.url_chats, session_id);
        let body = json!({
            "query": query_text,
            "generation": self.generation_block(language),
        });

        match self.post_json(&url, &body).await {
            Ok(raw) => {
                debug!(%session_id, "chat turn added");
                Ok(UpstreamReply::classify(raw))
            }
            Err(e) => {
                warn!(%session_id, error = %e, "chat turn failed, starting a new session");
                self.start_session(query_text, language, "").await
            }
        }
    }

    /// Runs a stateless legacy query with summary generation.
    ///
    /// This is the terminal fallback of the degradation chain; failures
    /// here propagate to the caller.
    pub async fn query_legacy(
        &self,
        query_text: &str,
        language: &str,
        metadata_filter: &str,
    ) -> Result<UpstreamReply> {
        if self.mock_mode {
            return Ok(UpstreamReply::classify(mock::legacy_reply(query_text)));
        }

        let body = json!({
            "query": [{
                "query": query_text,
                "num_results": self.cfg.num_results,
                "corpus_key": [{
                    "customer_id": self.numeric_id(self.cfg.customer_id.as_deref()),
                    "corpus_id": self.numeric_id(self.cfg.corpus_id.as_deref()),
                    "metadata_filter": metadata_filter,
                }],
                "summary": [{
                    "max_summarized_results": self.cfg.max_summarized_results,
                    "response_lang": language,
                    "summarizerPromptName": self.cfg.summarizer_prompt,
                }],
            }],
        });

        let raw = self.post_json(&self.url_query, &body).await?;
        info!(query_len = query_text.len(), "legacy query completed");
        Ok(UpstreamReply::classify(raw))
    }

    /// Ingests a document into the corpus.
    ///
    /// Returns the raw upstream receipt. Errors propagate; the caller
    /// decides how an ingestion failure surfaces.
    pub async fn ingest_document(
        &self,
        document_id: &str,
        title: &str,
        content: &str,
        metadata: &Value,
    ) -> Result<Value> {
        if self.mock_mode {
            return Ok(mock::ingest_receipt(document_id, title));
        }

        let metadata_json = serde_json::to_string(metadata)
            .map_err(|e| RagGatewayError::Decode(format!("metadata serialization: {e}")))?;

        let body = json!({
            "customer_id": self.numeric_id(self.cfg.customer_id.as_deref()),
            "corpus_id": self.numeric_id(self.cfg.corpus_id.as_deref()),
            "document": {
                "document_id": document_id,
                "title": title,
                "metadata_json": metadata_json,
                "section": [{"text": content}],
            },
        });

        let receipt = self.post_json(&self.url_index, &body).await?;
        info!(%document_id, "document ingested");
        Ok(receipt)
    }

    /* --------------------- Internals --------------------- */

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let started = Instant::now();
        debug!(body_len = body.to_string().len(), "POST {url}");

        let resp = self.client.post(url).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "upstream returned non-success status"
            );

            return Err(RagGatewayError::HttpStatus {
                status,
                url: url.to_string(),
                snippet,
            });
        }

        let raw: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    %url,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode upstream response"
                );
                return Err(RagGatewayError::Decode(format!(
                    "serde error: {e}; expected a JSON body"
                )));
            }
        };

        debug!(latency_ms = started.elapsed().as_millis(), "POST {url} ok");
        Ok(raw)
    }

    /// The upstream expects numeric ids where possible; keep the string
    /// form when the configured value is not a plain integer.
    fn numeric_id(&self, id: Option<&str>) -> Value {
        match id {
            Some(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(s.to_string())),
            None => Value::String(String::new()),
        }
    }

    fn generation_block(&self, language: &str) -> Value {
        json!({
            "max_used_search_results": self.cfg.max_summarized_results,
            "response_language": language,
            "prompt_name": self.cfg.summarizer_prompt,
        })
    }
}

/// Builds the metadata filter expression for caller-selected filter tags.
///
/// Tags become a disjunction of `doc.category = '<tag>'` clauses; an empty
/// tag list yields an empty filter (no restriction).
pub fn build_metadata_filter(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("doc.category = '{tag}'"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_client() -> VectaraClient {
        VectaraClient::new(GatewayConfig::default()).expect("client")
    }

    #[test]
    fn missing_credentials_mean_mock_mode() {
        assert!(mock_client().mock_mode());

        let cfg = GatewayConfig {
            customer_id: Some("123".into()),
            corpus_id: Some("7".into()),
            api_key: Some("zqt_key".into()),
            ..GatewayConfig::default()
        };
        assert!(!VectaraClient::new(cfg).expect("client").mock_mode());
    }

    #[test]
    fn partial_credentials_still_mock() {
        let cfg = GatewayConfig {
            customer_id: Some("123".into()),
            ..GatewayConfig::default()
        };
        assert!(VectaraClient::new(cfg).expect("client").mock_mode());
    }

    #[tokio::test]
    async fn mock_session_echoes_query_text() {
        let client = mock_client();
        let reply = client
            .start_session("what are the reserve requirements?", "en", "")
            .await
            .expect("mock reply");
        match reply {
            UpstreamReply::Session(s) => {
                let answer = s.turns.last().and_then(|t| t.answer.clone()).unwrap();
                assert!(answer.contains("what are the reserve requirements?"));
            }
            other => panic!("expected session shape, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn mock_legacy_is_legacy_shaped() {
        let client = mock_client();
        let reply = client.query_legacy("loan limits", "en", "").await.unwrap();
        assert!(matches!(reply, UpstreamReply::Legacy(_)));
    }

    #[tokio::test]
    async fn mock_ingest_returns_receipt() {
        let client = mock_client();
        let receipt = client
            .ingest_document("doc_1", "Circular 1234", "text", &serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(receipt["document_id"], "doc_1");
        assert_eq!(receipt["status"], "success");
    }

    #[test]
    fn metadata_filter_is_a_disjunction() {
        assert_eq!(build_metadata_filter(&[]), "");
        assert_eq!(
            build_metadata_filter(&["regulations".into()]),
            "doc.category = 'regulations'"
        );
        assert_eq!(
            build_metadata_filter(&["regulations".into(), "policies".into()]),
            "doc.category = 'regulations' OR doc.category = 'policies'"
        );
    }
}
