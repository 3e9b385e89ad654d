//! API route definitions
//!
//! Diagnosis service:
//! - POST /chatbot/diagnose-from-defect - anomaly + correlation diagnosis
//! - GET  /health
//!
//! Chat service:
//! - POST /api/chat - general chat pass-through
//! - GET  /health

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ChatState, DiagnosisState};

/// Routes served by the diagnosis service
pub fn diagnosis_routes(state: DiagnosisState) -> Router {
    Router::new()
        .route(
            "/chatbot/diagnose-from-defect",
            post(handlers::post_diagnose_from_defect),
        )
        .route("/health", get(handlers::diagnosis_health))
        .with_state(state)
}

/// Routes served by the chat service
pub fn chat_routes(state: ChatState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/health", get(handlers::chat_health))
        .with_state(state)
}
