//! Advisor Configuration - service addresses, model settings and diagnosis tables
//!
//! Every value has a built-in default matching the historical constants, so an
//! empty or missing `cnc_advisor.toml` yields the stock behaviour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{CorrelationRule, SensorGroup, SensorStats};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CNC_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "cnc_advisor.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration shared by the diagnosis and chat services.
///
/// Load with `AdvisorConfig::load()` which searches:
/// 1. `$CNC_CONFIG` env var
/// 2. `./cnc_advisor.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted chat-completion model
    #[serde(default)]
    pub llm: LlmConfig,

    /// General chat behaviour
    #[serde(default)]
    pub chat: ChatConfig,

    /// Sensor statistics, groups and correlation rules
    #[serde(default)]
    pub diagnosis: DiagnosisConfig,
}

impl AdvisorConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides.
    ///
    /// A file named by `$CNC_CONFIG` must load; failures there are returned.
    /// An unreadable or unparsable `./cnc_advisor.toml` is logged and skipped.
    /// Validation runs once, after overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_path(None)
    }

    /// Like [`load`](Self::load), but an explicit path (e.g. from `--config`)
    /// takes precedence over the search order and must load.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from_sources(path, Path::new(LOCAL_CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Resolve the config from an explicit path, a `CNC_CONFIG` value from
    /// `env`, or `local`, then apply overrides from `env` and validate once.
    pub fn load_from_sources<F>(explicit: Option<&Path>, local: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit {
            Some(p) => {
                let config = Self::read_file(p)?;
                info!(path = %p.display(), "Loaded advisor config");
                config
            }
            None => Self::read_file_or_default(local, &env)?,
        };
        config.apply_overrides_from(&env);
        config.validate()?;
        Ok(config)
    }

    fn read_file_or_default<F>(local: &Path, env: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Check env var
        if let Some(path) = env(CONFIG_PATH_ENV) {
            let p = PathBuf::from(path);
            let config = Self::read_file(&p)?;
            info!(path = %p.display(), "Loaded advisor config from CNC_CONFIG");
            return Ok(config);
        }

        // 2. Check ./cnc_advisor.toml
        if local.exists() {
            match Self::read_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded advisor config");
                    return Ok(config);
                }
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "Failed to load config, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse without validating; callers validate after overrides.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse_toml(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_toml(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))
    }

    /// Apply `CNC_*` overrides on top of file values, reading each variable
    /// through `lookup` (normally `std::env::var`).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("CNC_DIAGNOSIS_ADDR") {
            self.server.diagnosis_addr = addr;
        }
        if let Some(addr) = lookup("CNC_CHAT_ADDR") {
            self.server.chat_addr = addr;
        }
        if let Some(origins) = lookup("CNC_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(url) = lookup("CNC_LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("CNC_LLM_MODEL") {
            self.llm.model = model;
        }
    }

    /// Validate all sections, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = super::validation::validate_tables(&self.diagnosis);

        if self.llm.timeout_secs == 0 {
            errors.push("llm.timeout_secs must be > 0".to_string());
        }
        if self.llm.model.trim().is_empty() {
            errors.push("llm.model must not be empty".to_string());
        }
        if self.llm.base_url.trim().is_empty() {
            errors.push("llm.base_url must not be empty".to_string());
        }
        if self.llm.api_key_env.trim().is_empty() {
            errors.push("llm.api_key_env must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Diagnosis service bind address.
    ///
    /// Overridden by `CNC_DIAGNOSIS_ADDR` or `--addr`.
    #[serde(default = "default_diagnosis_addr")]
    pub diagnosis_addr: String,

    /// Chat service bind address.
    ///
    /// Overridden by `CNC_CHAT_ADDR` or `--addr`.
    #[serde(default = "default_chat_addr")]
    pub chat_addr: String,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_diagnosis_addr() -> String {
    defaults::DIAGNOSIS_SERVER_ADDR.to_string()
}

fn default_chat_addr() -> String {
    defaults::CHAT_SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            diagnosis_addr: default_diagnosis_addr(),
            chat_addr: default_chat_addr(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Per-call timeout (seconds)
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable carrying the API key
    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,
}

fn default_llm_base_url() -> String {
    defaults::LLM_BASE_URL.to_string()
}

fn default_llm_model() -> String {
    defaults::LLM_MODEL.to_string()
}

const fn default_llm_timeout_secs() -> u64 {
    defaults::LLM_TIMEOUT_SECS
}

fn default_llm_api_key_env() -> String {
    defaults::LLM_API_KEY_ENV.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout_secs(),
            api_key_env: default_llm_api_key_env(),
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System instruction prepended to every conversation
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Apology returned with HTTP 400 for a blank message
    #[serde(default = "default_empty_message_reply")]
    pub empty_message_reply: String,
}

fn default_persona() -> String {
    defaults::CHAT_PERSONA.to_string()
}

fn default_empty_message_reply() -> String {
    defaults::EMPTY_MESSAGE_REPLY.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            empty_message_reply: default_empty_message_reply(),
        }
    }
}

/// Static diagnosis tables as they appear in TOML.
///
/// Each list replaces its built-in counterpart wholesale when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    #[serde(default = "default_sensors")]
    pub sensors: Vec<SensorStats>,

    #[serde(default = "default_groups")]
    pub groups: Vec<SensorGroup>,

    #[serde(default = "default_rules")]
    pub rules: Vec<CorrelationRule>,
}

fn default_sensors() -> Vec<SensorStats> {
    defaults::SENSOR_STATS
        .iter()
        .map(|&(name, mean, std_dev)| SensorStats::new(name, mean, std_dev))
        .collect()
}

fn default_groups() -> Vec<SensorGroup> {
    defaults::SENSOR_GROUPS
        .iter()
        .map(|&(name, priority, members)| SensorGroup {
            name: name.to_string(),
            priority,
            members: members.iter().map(|m| (*m).to_string()).collect(),
        })
        .collect()
}

fn default_rules() -> Vec<CorrelationRule> {
    defaults::CORRELATION_RULES
        .iter()
        .map(|&(cause, effect, explanation)| CorrelationRule {
            cause: cause.to_string(),
            effect: effect.to_string(),
            explanation: explanation.to_string(),
        })
        .collect()
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            sensors: default_sensors(),
            groups: default_groups(),
            rules: default_rules(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({path}): {err}", path = .0.display(), err = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({path}): {err}", path = .0.display(), err = .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),
}
