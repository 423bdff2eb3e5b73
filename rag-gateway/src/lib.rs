//! Client for the hosted retrieval-augmented-generation service.
//!
//! Wraps two upstream protocol generations behind one type,
//! [`VectaraClient`]:
//!
//! - the session-oriented chat API (`POST /v2/chats`,
//!   `POST /v2/chats/{id}/turns`), and
//! - the stateless legacy query+summary API (`POST /v1/query`),
//!
//! plus document ingestion (`POST /v1/index`).
//!
//! When the required credentials (customer id, corpus id, api key) are not
//! all present at construction time the client runs permanently in **mock
//! mode**: every operation fabricates a deterministic payload of the same
//! shape a live call would return, so the rest of the pipeline can be
//! exercised without a network dependency.

pub mod client;
pub mod config;
pub mod error_handler;
pub mod mock;
pub mod payloads;
pub mod telemetry;

pub use client::{VectaraClient, build_metadata_filter};
pub use config::gateway_config::GatewayConfig;
pub use error_handler::{RagGatewayError, Result};
pub use payloads::{LegacyReply, SessionReply, UpstreamReply};
