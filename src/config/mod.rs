//! Advisor Configuration Module
//!
//! Service addresses, hosted-model settings, chat persona and the static
//! diagnosis tables, loaded from TOML with environment overrides.
//!
//! ## Loading Order
//!
//! 1. `CNC_CONFIG` environment variable (path to TOML file)
//! 2. `cnc_advisor.toml` in the current working directory
//! 3. Built-in defaults (the historical sensor statistics and rule table)
//!
//! ## Usage
//!
//! Load once in `main()` and hand the pieces to the services that need them:
//!
//! ```ignore
//! let config = AdvisorConfig::load()?;
//! let tables = Arc::new(DiagnosisTables::from_config(&config.diagnosis)?);
//! ```

mod advisor_config;
pub mod defaults;
pub mod validation;

pub use advisor_config::*;
