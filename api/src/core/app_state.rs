use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use answer_engine::Vocabulary;
use chat_store::ChatStore;
use rag_gateway::VectaraClient;
use summarizer::SummaryService;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// All collaborators are constructed once at startup; handlers receive
/// this through `State<Arc<AppState>>`.
pub struct AppState {
    /// Client for the hosted RAG service (mock mode without credentials).
    pub vectara: Arc<VectaraClient>,
    /// Detector/normalizer vocabulary, optionally overridden from a file.
    pub vocab: Arc<Vocabulary>,
    /// SQLite persistence for users, sessions, and documents.
    pub store: Arc<ChatStore>,
    /// Conversation summarizer (OpenAI with rule-based fallback).
    pub summarizer: Arc<SummaryService>,
    /// Issued bearer tokens, token -> username.
    pub tokens: RwLock<HashMap<String, String>>,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            vectara: Arc::new(VectaraClient::from_env()?),
            vocab: Arc::new(Vocabulary::from_env_or_default()),
            store: Arc::new(ChatStore::open_default()?),
            summarizer: Arc::new(SummaryService::from_env()?),
            tokens: RwLock::new(HashMap::new()),
        })
    }

    /// Mock-backed state with an in-memory database, for tests.
    #[cfg(test)]
    pub fn for_tests() -> Arc<Self> {
        use rag_gateway::GatewayConfig;
        use summarizer::SummarizerConfig;

        Arc::new(Self {
            vectara: Arc::new(VectaraClient::new(GatewayConfig::default()).expect("mock client")),
            vocab: Arc::new(Vocabulary::default()),
            store: Arc::new(ChatStore::open_in_memory().expect("in-memory store")),
            summarizer: Arc::new(
                SummaryService::new(SummarizerConfig::default()).expect("summarizer"),
            ),
            tokens: RwLock::new(HashMap::new()),
        })
    }
}
