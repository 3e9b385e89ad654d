//! CNC Advisor: defect diagnosis and general chat for a CNC dashboard
//!
//! Two stateless request/response services backed by a hosted chat model.
//!
//! ## Architecture
//!
//! - **Diagnosis**: z-score anomaly detection over ten spindle/axis sensors,
//!   rule-table correlation between sensor groups, model-written summary
//! - **Chat**: persona-prefixed pass-through to the hosted model
//! - **LLM Module**: `LanguageModel` trait with an OpenAI-compatible backend
//! - **Config**: TOML + environment configuration, including the static tables

pub mod api;
pub mod config;
pub mod diagnosis;
pub mod llm;
pub mod service;
pub mod types;

// Re-export configuration
pub use config::{AdvisorConfig, ConfigError};

// Re-export commonly used types
pub use types::{
    AbnormalReading, AbnormalReadings, CorrelationRule, Diagnosis, SensorGroup, SensorStats,
    SeverityLevel,
};

// Re-export diagnosis entry points
pub use diagnosis::{correlate, detect_abnormal, diagnose, DiagnosisTables};

// Re-export LLM components
pub use llm::{ChatMessage, LanguageModel, LlmError, OpenAiClient, Role};
