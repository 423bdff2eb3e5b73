use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
///
/// The 5xx variants carry deliberately generic display messages; the
/// underlying causes are logged at the handler before the error is
/// returned, never serialized into the response body.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config (never reach a response) ---
    #[error("upstream client configuration error")]
    Gateway(#[from] rag_gateway::RagGatewayError),

    #[error("summarizer configuration error")]
    Summarizer(#[from] summarizer::SummarizerError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("Invalid authentication credentials")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    // --- Mapped from lower layers ---
    #[error("internal storage error")]
    Store(#[from] chat_store::StoreError),

    #[error("Error processing chat request")]
    ChatPipeline(#[source] answer_engine::AnswerError),

    #[error("Error uploading document")]
    DocumentUpload(#[source] rag_gateway::RagGatewayError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,

            AppError::Gateway(_)
            | AppError::Summarizer(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Store(_)
            | AppError::ChatPipeline(_)
            | AppError::DocumentUpload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Gateway(_) => "GATEWAY_CONFIG_ERROR",
            AppError::Summarizer(_) => "SUMMARIZER_CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Store(_) => "STORE_ERROR",
            AppError::ChatPipeline(_) => "CHAT_ERROR",
            AppError::DocumentUpload(_) => "UPLOAD_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_pipeline_error_hides_the_cause() {
        let inner = answer_engine::AnswerError::Gateway(rag_gateway::RagGatewayError::Decode(
            "secret detail".into(),
        ));
        let err = AppError::ChatPipeline(inner);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error processing chat request");
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.error_code(), "UNAUTHORIZED");
    }
}
