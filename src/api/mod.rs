//! REST API module using Axum
//!
//! Two independent routers, one per service, each wrapped in request
//! tracing and CORS so the dashboard front end can call them directly.

mod error;
pub mod handlers;
mod routes;

pub use error::{ApiError, ApiErrorResponse, ErrorDetail, ResponseMeta};
pub use handlers::{ChatState, DiagnosisState};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer.
///
/// An empty origin list allows any origin (the dashboard is served from a
/// different host). Otherwise only the listed origins are accepted.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    tracing::info!(origins = ?origins, "CORS: allowing configured origins");
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Create the diagnosis service application.
pub fn create_diagnosis_app(state: DiagnosisState, cors_origins: &[String]) -> Router {
    routes::diagnosis_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
}

/// Create the chat service application.
pub fn create_chat_app(state: ChatState, cors_origins: &[String]) -> Router {
    routes::chat_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
}
