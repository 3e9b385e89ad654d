//! CNC Advisor - Defect Diagnosis Service
//!
//! Flags abnormal sensor readings in a failed part's snapshot, cross-references
//! them against the sensor-group rule table and asks the hosted model for a
//! short operator-facing summary.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --release
//! cargo run --release -- --addr 127.0.0.1:8001 --config ./cnc_advisor.toml
//! ```
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: hosted model credential (name set by `llm.api_key_env`)
//! - `CNC_CONFIG`: path to a TOML config file
//! - `CNC_DIAGNOSIS_ADDR`: bind address (default: 0.0.0.0:8001)
//! - `CNC_CORS_ORIGINS`: comma-separated allowed origins (default: any)
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::info;

use cnc_advisor::api::{create_diagnosis_app, DiagnosisState};
use cnc_advisor::config::AdvisorConfig;
use cnc_advisor::diagnosis::DiagnosisTables;
use cnc_advisor::service;

#[derive(Parser, Debug)]
#[command(name = "cnc-advisor")]
#[command(about = "CNC defect diagnosis service")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8001")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file (same as CNC_CONFIG)
    #[arg(long, env = "CNC_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    service::init_tracing("info");

    let args = CliArgs::parse();

    let mut config = AdvisorConfig::load_with_path(args.config.as_deref().map(Path::new))?;
    if let Some(addr) = args.addr {
        config.server.diagnosis_addr = addr;
    }

    let tables = DiagnosisTables::from_config(&config.diagnosis)
        .context("Invalid diagnosis tables")?;
    info!(
        sensors = tables.sensors().len(),
        groups = tables.groups().len(),
        rules = tables.rules().len(),
        "Diagnosis tables loaded"
    );

    let model = service::build_model(&config.llm)?;
    let state = DiagnosisState::new(tables, model);
    let app = create_diagnosis_app(state, &config.server.cors_origins);

    info!("Starting CNC defect diagnosis service");
    service::serve(app, &config.server.diagnosis_addr).await
}
