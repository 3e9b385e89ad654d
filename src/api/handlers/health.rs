//! Health endpoints

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<&'static str>,
}

/// GET /health on the diagnosis service
pub async fn diagnosis_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service_type: None,
    })
}

/// GET /health on the chat service
pub async fn chat_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service_type: Some("general_chatbot"),
    })
}
