//! Validated, read-only lookup over the diagnosis tables

use crate::config::{validation, ConfigError, DiagnosisConfig};
use crate::types::{CorrelationRule, SensorGroup, SensorStats};

/// Sensor statistics, group membership, priorities and correlation rules.
///
/// Built once at startup from [`DiagnosisConfig`] and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DiagnosisTables {
    sensors: Vec<SensorStats>,
    groups: Vec<SensorGroup>,
    rules: Vec<CorrelationRule>,
}

impl DiagnosisTables {
    /// Validate the configured tables and freeze them.
    pub fn from_config(config: &DiagnosisConfig) -> Result<Self, ConfigError> {
        let errors = validation::validate_tables(config);
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(Self {
            sensors: config.sensors.clone(),
            groups: config.groups.clone(),
            rules: config.rules.clone(),
        })
    }

    /// The ten historical sensors, groups and rules.
    pub fn builtin() -> Self {
        let config = DiagnosisConfig::default();
        Self {
            sensors: config.sensors,
            groups: config.groups,
            rules: config.rules,
        }
    }

    /// Monitored sensors in table order.
    pub fn sensors(&self) -> &[SensorStats] {
        &self.sensors
    }

    pub fn sensor(&self, name: &str) -> Option<&SensorStats> {
        self.sensors.iter().find(|s| s.name == name)
    }

    pub fn groups(&self) -> &[SensorGroup] {
        &self.groups
    }

    pub fn rules(&self) -> &[CorrelationRule] {
        &self.rules
    }

    /// Explanation for the ordered pair `(cause, effect)`, if a rule exists.
    pub fn rule(&self, cause: &str, effect: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.matches(cause, effect))
            .map(|r| r.explanation.as_str())
    }
}

impl Default for DiagnosisTables {
    fn default() -> Self {
        Self::builtin()
    }
}
