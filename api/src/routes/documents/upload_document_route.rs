use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    core::{app_state::AppState, auth},
    error_handler::{AppError, AppResult},
    routes::documents::{
        upload_document_request::UploadDocumentRequest,
        upload_document_response::UploadDocumentResponse,
    },
};

/// Ingests a document into the corpus and records the upload.
///
/// Ingestion failures surface as a generic 500; the local record is
/// best-effort and never fails the request.
pub async fn upload_document_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UploadDocumentRequest>,
) -> AppResult<Json<UploadDocumentResponse>> {
    let user = auth::require_user(&state, &headers)?;

    let document_id = format!("doc_{}_{}", Utc::now().timestamp_micros(), user.username);
    let metadata = json!({
        "filename": body.filename,
        "classification": body.classification,
        "uploaded_by": user.username,
        "uploaded_at": Utc::now().to_rfc3339(),
        "source": "upload",
        "category": "general",
    });

    state
        .vectara
        .ingest_document(&document_id, &body.filename, &body.content, &metadata)
        .await
        .map_err(|e| {
            error!(error = %e, %document_id, "document ingestion failed");
            AppError::DocumentUpload(e)
        })?;

    if let Err(e) = state
        .store
        .save_document(&document_id, &body.filename, &body.classification, user.id)
    {
        warn!(error = %e, %document_id, "failed to record document upload");
    }

    info!(username = %user.username, %document_id, filename = %body.filename, "document uploaded");

    Ok(Json(UploadDocumentResponse {
        message: "Document uploaded and processed successfully",
        document_id,
        filename: body.filename,
        classification: body.classification,
        status: "processed",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[tokio::test]
    async fn upload_records_the_document_for_its_owner() {
        let state = AppState::for_tests();
        let token = auth::issue_token(&state, "analyst");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let body = UploadDocumentRequest {
            filename: "circular-2026-01.pdf".into(),
            content: "All banks shall maintain the prescribed reserve ratio.".into(),
            classification: "public".into(),
        };

        let Json(resp) = upload_document_route(State(state.clone()), headers, Json(body))
            .await
            .expect("upload");
        assert_eq!(resp.status, "processed");

        let user = state.store.get_user_by_username("analyst").unwrap().unwrap();
        let docs = state.store.documents_for_user(user.id).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "circular-2026-01.pdf");
    }
}
