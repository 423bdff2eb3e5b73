//! HTTP surface of the banking assistant backend.
//!
//! Routes:
//! - `GET  /` and `GET /health`       — unauthenticated health check
//! - `POST /auth/login`, `GET /auth/me`
//! - `POST /chat`                     — the answer pipeline
//! - `POST /chat-summary`
//! - `POST /documents/upload`, `GET /documents`
//! - `GET|POST /chat-sessions`, `DELETE /chat-sessions/{session_id}`

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use std::{env, sync::Arc};

use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

/// Builds shared state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::health_route::health))
        .route("/health", get(routes::health::health_route::health))
        .route("/auth/login", post(routes::auth::login_route::login_route))
        .route("/auth/me", get(routes::auth::me_route::me_route))
        .route("/chat", post(routes::chat::chat_route::chat_route))
        .route(
            "/chat-summary",
            post(routes::chat_summary::chat_summary_route::chat_summary_route),
        )
        .route(
            "/documents/upload",
            post(routes::documents::upload_document_route::upload_document_route),
        )
        .route(
            "/documents",
            get(routes::documents::list_documents_route::list_documents_route),
        )
        .route(
            "/chat-sessions",
            get(routes::sessions::list_sessions_route::list_sessions_route)
                .post(routes::sessions::create_session_route::create_session_route),
        )
        .route(
            "/chat-sessions/{session_id}",
            delete(routes::sessions::delete_session_route::delete_session_route),
        )
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
