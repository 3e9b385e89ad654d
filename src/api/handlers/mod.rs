//! API route handlers
//!
//! - Defect diagnosis (anomaly detection, correlation, model summary)
//! - General chat pass-through
//! - Static health payloads

mod chat;
mod diagnosis;
mod health;

pub use chat::*;
pub use diagnosis::*;
pub use health::*;

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::diagnosis::DiagnosisTables;
use crate::llm::LanguageModel;

// ============================================================================
// API State
// ============================================================================

/// Shared state for the diagnosis service
#[derive(Clone)]
pub struct DiagnosisState {
    /// Read-only sensor, group and rule tables
    pub tables: Arc<DiagnosisTables>,
    /// Model used for the advice summary
    pub model: Arc<dyn LanguageModel>,
}

impl DiagnosisState {
    pub fn new(tables: DiagnosisTables, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            tables: Arc::new(tables),
            model,
        }
    }
}

/// Shared state for the chat service
#[derive(Clone)]
pub struct ChatState {
    pub model: Arc<dyn LanguageModel>,
    /// Persona and empty-message reply
    pub chat: Arc<ChatConfig>,
}

impl ChatState {
    pub fn new(chat: ChatConfig, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            chat: Arc::new(chat),
        }
    }
}
