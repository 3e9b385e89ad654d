//! Terminal client for exercising the chat service by hand.
//!
//! Keeps the conversation history locally and sends it with every message.
//!
//! ```bash
//! cargo run --bin chat-console
//! cargo run --bin chat-console -- --url http://10.0.0.5:4002/api/chat
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write as _;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use cnc_advisor::api::handlers::ChatResponse;
use cnc_advisor::config::defaults;
use cnc_advisor::llm::ChatMessage;

#[derive(Parser, Debug)]
#[command(name = "chat-console")]
#[command(about = "Interactive terminal client for the chat service")]
struct CliArgs {
    /// Chat endpoint URL
    #[arg(long, default_value = defaults::CHAT_CONSOLE_URL)]
    url: String,
}

#[derive(serde::Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .context("Failed to build HTTP client")?;

    println!("{}", "=".repeat(50));
    println!("General chat console");
    println!("Endpoint: {}", args.url);
    println!("Type 'exit' to quit");
    println!("{}", "=".repeat(50));

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") {
            println!("Bye.");
            break;
        }
        if message.is_empty() {
            continue;
        }

        match send(&client, &args.url, message, &history).await {
            Ok(reply) => {
                println!("\nBot({}): {}", reply.route, reply.answer);
                history.push(ChatMessage::user(message));
                history.push(ChatMessage::assistant(reply.answer));
            }
            Err(e) if is_connect_error(&e) => {
                println!("Cannot reach the chat service at {}. Is chat-server running?", args.url);
            }
            Err(e) => println!("Error: {e:#}"),
        }
    }

    Ok(())
}

async fn send(
    client: &reqwest::Client,
    url: &str,
    message: &str,
    history: &[ChatMessage],
) -> Result<ChatResponse> {
    let response = client
        .post(url)
        .json(&ChatPayload { message, history })
        .send()
        .await?
        .error_for_status()?;
    response.json().await.context("Malformed chat response")
}

fn is_connect_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<reqwest::Error>()
        .is_some_and(reqwest::Error::is_connect)
}
