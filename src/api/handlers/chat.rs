//! General chat endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ChatState;
use crate::api::ApiError;
use crate::config::defaults::CHAT_ROUTE;
use crate::llm::ChatMessage;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Prior turns supplied by the caller
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub route: String,
}

impl ChatResponse {
    fn general(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            route: CHAT_ROUTE.to_string(),
        }
    }
}

/// Persona first, then the caller's history, then the new user turn.
pub fn build_chat_messages(persona: &str, history: Vec<ChatMessage>, question: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(persona));
    messages.extend(history);
    messages.push(ChatMessage::user(question));
    messages
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<ChatState>,
    Json(request): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), ApiError> {
    let question = request.message.as_deref().map(str::trim).unwrap_or_default();
    if question.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::general(state.chat.empty_message_reply.clone())),
        ));
    }

    let history = request.history.unwrap_or_default();
    debug!(history = history.len(), "Forwarding chat turn");

    let messages = build_chat_messages(&state.chat.persona, history, question);
    let answer = state.model.chat(&messages).await.map_err(|e| {
        warn!(backend = state.model.backend_name(), error = %e, "Chat completion failed");
        ApiError::from(e)
    })?;

    Ok((StatusCode::OK, Json(ChatResponse::general(answer))))
}
