//! Error responses for the HTTP API.
//!
//! Failures are returned as `{ "error": { "code", "message" }, "meta": { ... } }`
//! so the dashboard can tell a bad request from an upstream model problem.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::diagnosis::FeatureError;
use crate::llm::LlmError;

/// Metadata included in every error response.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

/// Request-level failures surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input could not be coerced into what the handler needs
    #[error("{0}")]
    Validation(String),

    /// The hosted model failed or timed out
    #[error("upstream model error: {0}")]
    Upstream(#[from] LlmError),
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream(e) if e.is_timeout() => "UPSTREAM_TIMEOUT",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
            meta: ResponseMeta::default(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
