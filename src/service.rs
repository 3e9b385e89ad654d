//! Service startup shared by the diagnosis and chat binaries
//!
//! Logging init, model construction, bind + serve with graceful shutdown.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::LlmConfig;
use crate::llm::{LanguageModel, OpenAiClient};

/// Initialize `tracing` from `RUST_LOG`, falling back to `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

/// Build the hosted-model client.
///
/// A missing API key is a fatal startup error.
pub fn build_model(config: &LlmConfig) -> Result<Arc<dyn LanguageModel>> {
    let api_key = config.api_key()?;
    let client = OpenAiClient::new(config, api_key).context("Failed to build model HTTP client")?;

    info!(
        backend = client.backend_name(),
        model = %client.model(),
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "Hosted model client ready"
    );

    Ok(Arc::new(client))
}

/// Bind `addr` and serve `app` until Ctrl+C.
pub async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
