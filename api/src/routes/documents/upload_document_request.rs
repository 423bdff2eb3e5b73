use serde::Deserialize;

/// Request body for `POST /documents/upload`.
#[derive(Debug, Deserialize)]
pub struct UploadDocumentRequest {
    pub filename: String,
    /// Plain-text document content to ingest.
    pub content: String,
    /// public, confidential, secret, or top_secret.
    #[serde(default = "default_classification")]
    pub classification: String,
}

fn default_classification() -> String {
    "public".to_string()
}
