use serde::Serialize;

/// Response body for `POST /documents/upload`.
#[derive(Debug, Serialize)]
pub struct UploadDocumentResponse {
    pub message: &'static str,
    pub document_id: String,
    pub filename: String,
    pub classification: String,
    pub status: &'static str,
}
