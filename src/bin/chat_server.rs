//! CNC Advisor - General Chat Service
//!
//! Thin pass-through to the hosted model: a fixed persona plus the caller's
//! history and question, one call per request.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --release --bin chat-server
//! cargo run --release --bin chat-server -- --addr 127.0.0.1:4002
//! ```
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: hosted model credential (name set by `llm.api_key_env`)
//! - `CNC_CONFIG`: path to a TOML config file
//! - `CNC_CHAT_ADDR`: bind address (default: 0.0.0.0:4002)
//! - `RUST_LOG`: logging level (default: info)

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

use cnc_advisor::api::{create_chat_app, ChatState};
use cnc_advisor::config::AdvisorConfig;
use cnc_advisor::service;

#[derive(Parser, Debug)]
#[command(name = "chat-server")]
#[command(about = "General-purpose chat service backed by the hosted model")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:4002")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file (same as CNC_CONFIG)
    #[arg(long, env = "CNC_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    service::init_tracing("info");

    let args = CliArgs::parse();

    let mut config = AdvisorConfig::load_with_path(args.config.as_deref().map(Path::new))?;
    if let Some(addr) = args.addr {
        config.server.chat_addr = addr;
    }

    let model = service::build_model(&config.llm)?;
    let state = ChatState::new(config.chat, model);
    let app = create_chat_app(state, &config.server.cors_origins);

    info!("Starting general chat service");
    service::serve(app, &config.server.chat_addr).await
}
