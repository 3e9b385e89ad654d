//! Static sensor, group and correlation-rule table entries

use serde::{Deserialize, Serialize};

/// Historical mean and standard deviation for one sensor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorStats {
    /// Sensor identifier as it appears in request feature maps
    pub name: String,
    /// Historical mean
    pub mean: f64,
    /// Historical standard deviation (0 disables z-scoring for the sensor)
    pub std_dev: f64,
}

impl SensorStats {
    pub fn new(name: impl Into<String>, mean: f64, std_dev: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            std_dev,
        }
    }

    /// Signed distance from the mean in standard deviations.
    ///
    /// Returns 0.0 when the stored deviation is zero.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            return 0.0;
        }
        (value - self.mean) / self.std_dev
    }
}

/// A named cluster of related sensor channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorGroup {
    pub name: String,
    /// Evaluation order when several groups are active (lower first)
    pub priority: u32,
    /// Member sensor names, in table order
    pub members: Vec<String>,
}

impl SensorGroup {
    pub fn contains(&self, sensor: &str) -> bool {
        self.members.iter().any(|m| m == sensor)
    }
}

/// Directional explanation keyed by an ordered pair of group names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationRule {
    /// Group evaluated first in the pair
    pub cause: String,
    /// Group evaluated second in the pair
    pub effect: String,
    pub explanation: String,
}

impl CorrelationRule {
    pub fn matches(&self, cause: &str, effect: &str) -> bool {
        self.cause == cause && self.effect == effect
    }
}
