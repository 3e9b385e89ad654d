//! LLM Backend Module
//!
//! Narrow interface over the hosted chat-completion model so the diagnosis
//! and chat flows can be exercised without network access.
//!
//! ## Architecture
//!
//! - **LanguageModel**: async trait taking a role/content message list and
//!   returning the single reply text
//! - **OpenAiClient**: OpenAI-compatible HTTPS backend with a bounded timeout

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod openai;

pub use openai::OpenAiClient;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role + content pair of the chat-message protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Upstream model failures.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("model request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response contained no message content")]
    EmptyResponse,
}

impl LlmError {
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Unified trait for chat-completion backends
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send the full message list and return the reply text.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;

    /// Single user-turn completion.
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError> {
        self.chat(&[ChatMessage::user(prompt)]).await
    }
}
