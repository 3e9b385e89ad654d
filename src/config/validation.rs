//! Config validation: unknown-key detection with Levenshtein suggestions
//! and consistency checks for the diagnosis tables.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::DiagnosisConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AdvisorConfig`.
///
/// Array-of-table entries (`[[diagnosis.sensors]]`) are not descended into.
/// Any new field added to `AdvisorConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.diagnosis_addr",
        "server.chat_addr",
        "server.cors_origins",
        // [llm]
        "llm",
        "llm.base_url",
        "llm.model",
        "llm.timeout_secs",
        "llm.api_key_env",
        // [chat]
        "chat",
        "chat.persona",
        "chat.empty_message_reply",
        // [diagnosis]
        "diagnosis",
        "diagnosis.sensors",
        "diagnosis.groups",
        "diagnosis.rules",
    ];
    keys.iter().copied().collect()
}

/// Collect dotted key paths of every table key in a TOML document.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3, if any.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

/// Warn about keys `AdvisorConfig` does not know.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Diagnosis Table Consistency
// ============================================================================

/// Check the sensor, group and rule tables against each other.
///
/// Returns one message per problem; an empty list means the tables are usable.
pub fn validate_tables(tables: &DiagnosisConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if tables.sensors.is_empty() {
        errors.push("diagnosis.sensors must list at least one sensor".to_string());
    }

    let mut sensor_names = HashSet::new();
    for sensor in &tables.sensors {
        if sensor.name.trim().is_empty() {
            errors.push("diagnosis.sensors: sensor name must not be empty".to_string());
        }
        if !sensor_names.insert(sensor.name.as_str()) {
            errors.push(format!("diagnosis.sensors: duplicate sensor '{}'", sensor.name));
        }
        if !sensor.mean.is_finite() {
            errors.push(format!("diagnosis.sensors: '{}' mean must be finite", sensor.name));
        }
        if !sensor.std_dev.is_finite() || sensor.std_dev < 0.0 {
            errors.push(format!(
                "diagnosis.sensors: '{}' std_dev must be finite and >= 0 (got {})",
                sensor.name, sensor.std_dev
            ));
        }
    }

    let mut group_names = HashSet::new();
    for group in &tables.groups {
        if !group_names.insert(group.name.as_str()) {
            errors.push(format!("diagnosis.groups: duplicate group '{}'", group.name));
        }
        if group.members.is_empty() {
            errors.push(format!("diagnosis.groups: '{}' has no members", group.name));
        }
        for member in &group.members {
            if !sensor_names.contains(member.as_str()) {
                errors.push(format!(
                    "diagnosis.groups: '{}' lists unknown sensor '{member}'",
                    group.name
                ));
            }
        }
    }

    let mut pairs = HashSet::new();
    for rule in &tables.rules {
        for endpoint in [&rule.cause, &rule.effect] {
            if !group_names.contains(endpoint.as_str()) {
                errors.push(format!(
                    "diagnosis.rules: '{} -> {}' references unknown group '{endpoint}'",
                    rule.cause, rule.effect
                ));
            }
        }
        if !pairs.insert((rule.cause.as_str(), rule.effect.as_str())) {
            errors.push(format!(
                "diagnosis.rules: duplicate rule for '{} -> {}'",
                rule.cause, rule.effect
            ));
        }
        if rule.explanation.trim().is_empty() {
            errors.push(format!(
                "diagnosis.rules: '{} -> {}' has an empty explanation",
                rule.cause, rule.effect
            ));
        }
    }

    errors
}
