//! Feature coercion - raw JSON feature maps to numeric sensor values

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::DiagnosisTables;

/// A table sensor whose supplied value cannot be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("feature '{name}' is not a finite number (got {raw})")]
pub struct FeatureError {
    pub name: String,
    pub raw: String,
}

/// Coerce every table sensor to `f64`.
///
/// Numbers pass through, numeric strings are parsed, booleans become 1/0,
/// and `null` or absent keys become 0. Keys outside the table are dropped
/// without inspection.
pub fn coerce_features(
    tables: &DiagnosisTables,
    raw: &Map<String, Value>,
) -> Result<HashMap<String, f64>, FeatureError> {
    tables
        .sensors()
        .iter()
        .map(|stats| -> Result<(String, f64), FeatureError> {
            let value = match raw.get(&stats.name) {
                None => 0.0,
                Some(v) => coerce_value(v).ok_or_else(|| FeatureError {
                    name: stats.name.clone(),
                    raw: v.to_string(),
                })?,
            };
            Ok((stats.name.clone(), value))
        })
        .collect()
}

fn coerce_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}
