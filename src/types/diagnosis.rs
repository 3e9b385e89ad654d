//! Per-request diagnosis outputs: abnormal readings, severity tiers, payload

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Z-score magnitude at or above which a reading is flagged.
pub const ABNORMAL_Z_THRESHOLD: f64 = 2.0;

/// Z-score magnitude at or above which a flagged reading is "caution".
pub const CAUTION_Z_THRESHOLD: f64 = 3.0;

/// Z-score magnitude at or above which a flagged reading is "severe".
pub const SEVERE_Z_THRESHOLD: f64 = 4.0;

/// Severity tier derived from z-score magnitude bands.
///
/// Ordered so that `max()` over a set of readings yields the overall tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Mild,
    Caution,
    Severe,
}

impl SeverityLevel {
    /// Classify `|z|`: below 3 is mild, below 4 is caution, otherwise severe.
    pub fn from_z_magnitude(abs_z: f64) -> Self {
        if abs_z < CAUTION_Z_THRESHOLD {
            Self::Mild
        } else if abs_z < SEVERE_Z_THRESHOLD {
            Self::Caution
        } else {
            Self::Severe
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Caution => "caution",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sensor reading whose z-score magnitude crossed the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbnormalReading {
    /// Raw value supplied (or defaulted) for the sensor
    pub value: f64,
    /// Human-readable deviation, e.g. "13.10 above the mean"
    pub reason: String,
    /// Signed z-score rounded to 2 decimals
    pub z: f64,
    pub level: SeverityLevel,
}

/// Abnormal readings keyed by sensor name, in sensor-table order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbnormalReadings {
    entries: Vec<(String, AbnormalReading)>,
}

impl AbnormalReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sensor: impl Into<String>, reading: AbnormalReading) {
        let sensor = sensor.into();
        match self.entries.iter_mut().find(|(name, _)| *name == sensor) {
            Some((_, existing)) => *existing = reading,
            None => self.entries.push((sensor, reading)),
        }
    }

    pub fn get(&self, sensor: &str) -> Option<&AbnormalReading> {
        self.entries
            .iter()
            .find(|(name, _)| name == sensor)
            .map(|(_, reading)| reading)
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.get(sensor).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AbnormalReading)> {
        self.entries.iter().map(|(name, reading)| (name.as_str(), reading))
    }

    pub fn sensor_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Highest tier among the readings.
    ///
    /// Falls through to [`SeverityLevel::Mild`] when there are no readings,
    /// so callers must check [`is_empty`](Self::is_empty) to tell the two apart.
    pub fn overall_severity(&self) -> SeverityLevel {
        self.entries
            .iter()
            .map(|(_, reading)| reading.level)
            .max()
            .unwrap_or(SeverityLevel::Mild)
    }
}

impl Serialize for AbnormalReadings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, reading) in &self.entries {
            map.serialize_entry(name, reading)?;
        }
        map.end()
    }
}

/// Diagnosis payload returned by the defect endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    /// Model-written summary, or a `model error: ...` note
    pub expert_advice: String,
    pub abnormal: AbnormalReadings,
    /// Matched correlation explanations, deduplicated, first occurrence kept
    pub correlations: Vec<String>,
    pub severity: SeverityLevel,
}
