//! Anomaly Detector - z-score thresholding against historical statistics
//!
//! Every sensor in the table is checked on every call. A sensor missing from
//! the feature map is evaluated as 0.0, which registers as a large anomaly
//! for any channel whose mean sits far from zero relative to its deviation.

use std::collections::HashMap;

use super::DiagnosisTables;
use crate::types::{AbnormalReading, AbnormalReadings, SensorStats, SeverityLevel, ABNORMAL_Z_THRESHOLD};

/// Flag every table sensor whose `|z| >= 2`.
///
/// Keys not present in the table are ignored. The result keeps table order.
pub fn detect_abnormal(tables: &DiagnosisTables, features: &HashMap<String, f64>) -> AbnormalReadings {
    let mut abnormal = AbnormalReadings::new();

    for stats in tables.sensors() {
        let value = features.get(&stats.name).copied().unwrap_or(0.0);
        if let Some(reading) = check_reading(stats, value) {
            abnormal.insert(stats.name.clone(), reading);
        }
    }

    abnormal
}

/// Evaluate one value against its sensor statistics.
pub fn check_reading(stats: &SensorStats, value: f64) -> Option<AbnormalReading> {
    let z = stats.z_score(value);
    let abs_z = z.abs();
    if abs_z < ABNORMAL_Z_THRESHOLD {
        return None;
    }

    Some(AbnormalReading {
        value,
        reason: deviation_reason(value - stats.mean, z),
        z: round2(z),
        level: SeverityLevel::from_z_magnitude(abs_z),
    })
}

/// "<|diff|> above/below the mean", diff rounded to 2 decimals.
fn deviation_reason(diff: f64, z: f64) -> String {
    let direction = if z > 0.0 { "above" } else { "below" };
    format!("{:.2} {direction} the mean", round2(diff).abs())
}

/// Round to 2 decimals. Magnitudes past 1e15 carry no fractional part and
/// would overflow the scaled intermediate, so they pass through.
pub(crate) fn round2(x: f64) -> f64 {
    if x.abs() >= 1e15 {
        return x;
    }
    (x * 100.0).round() / 100.0
}
