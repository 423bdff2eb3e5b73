use std::sync::Arc;

use answer_engine::{AnswerResult, ChatQuery, resolve_answer};
use axum::{Json, extract::State, http::HeaderMap};
use chat_store::UserRecord;
use tracing::{error, info, warn};

use crate::{
    core::{app_state::AppState, auth},
    error_handler::{AppError, AppResult},
    routes::chat::{chat_request::ChatRequest, chat_response::ChatResponse},
};

/// Core chatbot endpoint.
///
/// Resolves the message through the answer pipeline, then persists the
/// exchange best-effort: a storage failure is logged and never breaks
/// the chat flow. Pipeline failures map to a generic 500 with no
/// upstream detail in the body.
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let user = auth::require_user(&state, &headers)?;

    let continuing = body
        .conversation_id
        .as_deref()
        .is_some_and(|id| !id.is_empty());

    let query = ChatQuery {
        text: body.message,
        language: body.language,
        session_id: body.conversation_id.filter(|id| !id.is_empty()),
        history: body.conversation_history,
        filters: body.filters,
    };

    let result = resolve_answer(&state.vectara, &query, &state.vocab)
        .await
        .map_err(|e| {
            error!(error = %e, username = %user.username, "answer resolution failed");
            AppError::ChatPipeline(e)
        })?;

    let conversation_id = result
        .session_id
        .clone()
        .or_else(|| query.session_id.clone())
        .unwrap_or_default();

    if !conversation_id.is_empty() {
        if let Err(e) = persist_exchange(&state, &user, &query, &conversation_id, &result, !continuing)
        {
            warn!(error = %e, %conversation_id, "failed to persist chat exchange");
        }
    }

    info!(
        username = %user.username,
        %conversation_id,
        sources = result.sources.len(),
        "chat request completed"
    );

    Ok(Json(ChatResponse {
        message: result.answer_text,
        conversation_id,
        sources: result.sources,
    }))
}

fn persist_exchange(
    state: &AppState,
    user: &UserRecord,
    query: &ChatQuery,
    conversation_id: &str,
    result: &AnswerResult,
    is_new: bool,
) -> chat_store::Result<()> {
    if is_new {
        state.store.create_session(conversation_id, user.id)?;
    }
    let sources = serde_json::to_value(&result.sources)?;
    state.store.save_exchange(
        conversation_id,
        &query.text,
        &result.answer_text,
        query.language.as_str(),
        &sources,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    fn auth_headers(state: &AppState, username: &str) -> HeaderMap {
        let token = auth::issue_token(state, username);
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.into(),
            conversation_id: None,
            language: answer_engine::Language::En,
            filters: Vec::new(),
            conversation_history: Vec::new(),
        }
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let state = AppState::for_tests();
        let out = chat_route(State(state), HeaderMap::new(), Json(request("Hello"))).await;
        assert!(matches!(out, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn greeting_answers_without_creating_a_session() {
        let state = AppState::for_tests();
        let headers = auth_headers(&state, "user1");

        let Json(resp) = chat_route(State(state.clone()), headers, Json(request("Hello")))
            .await
            .expect("chat");

        assert!(resp.conversation_id.is_empty());
        assert!(resp.sources.is_empty());

        let user = state.store.get_user_by_username("user1").unwrap().unwrap();
        assert!(state.store.list_sessions(user.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn banking_question_creates_and_persists_a_session() {
        let state = AppState::for_tests();
        let headers = auth_headers(&state, "user1");

        let Json(resp) = chat_route(
            State(state.clone()),
            headers,
            Json(request("what are the loan limits?")),
        )
        .await
        .expect("chat");

        // Mock-mode session ids are deterministic.
        assert_eq!(resp.conversation_id, "chat_mock_00000001");
        assert!(resp.message.contains("loan limits"));

        let user = state.store.get_user_by_username("user1").unwrap().unwrap();
        let sessions = state.store.list_sessions(user.id).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].exchanges[0].user_message, "what are the loan limits?");
    }
}
