use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

/// Unauthenticated health check, also served at `/`.
pub async fn health() -> Json<Value> {
    Json(json!({
        "message": "Banking Assistant API",
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
