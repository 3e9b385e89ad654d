//! Config Validation Tests
//!
//! Typo detection on raw TOML, file loading through `tempfile`, and
//! consistency checks across the sensor, group and rule tables.

use cnc_advisor::config::validation::{
    known_config_keys, suggest_correction, validate_tables, validate_unknown_keys,
};
use cnc_advisor::config::{AdvisorConfig, ConfigError, DiagnosisConfig};
use cnc_advisor::diagnosis::DiagnosisTables;
use cnc_advisor::types::{CorrelationRule, SensorGroup};

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_llm_section_warns_with_suggestion() {
    let toml_str = r#"
[llm]
modle = "gpt-4o"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("modle"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("llm.model"));
}

#[test]
fn typo_in_server_section_warns() {
    let toml_str = r#"
[server]
chat_adr = "0.0.0.0:5000"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("server.chat_addr"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[server]
diagnosis_addr = "127.0.0.1:8001"
chat_addr = "127.0.0.1:4002"
cors_origins = ["http://localhost:3000"]

[llm]
base_url = "http://localhost:11434/v1"
model = "llama3"
timeout_secs = 30
api_key_env = "LOCAL_LLM_KEY"

[chat]
persona = "You are a terse assistant."
empty_message_reply = "Say something."

[[diagnosis.sensors]]
name = "X_OutputCurrent"
mean = 326.9
std_dev = 2.25
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn unrelated_key_gets_no_suggestion() {
    let known = known_config_keys();
    assert!(suggest_correction("completely_unrelated_section.zzz", &known).is_none());
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_from_file_applies_partial_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[llm]
model = "gpt-4o"
timeout_secs = 20

[chat]
empty_message_reply = "Please ask something."
"#
    )
    .unwrap();

    let config = AdvisorConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.llm.timeout_secs, 20);
    assert_eq!(config.chat.empty_message_reply, "Please ask something.");
    // Untouched sections keep defaults
    assert_eq!(config.server.diagnosis_addr, "0.0.0.0:8001");
    assert_eq!(config.diagnosis.sensors.len(), 10);
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    match AdvisorConfig::load_from_file(&path) {
        Err(ConfigError::Io(p, _)) => assert_eq!(p, path),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn parse_error_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[llm\nmodel = ").unwrap();

    let err = AdvisorConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(ref p, _) if p == file.path()));
}

#[test]
fn custom_tables_replace_builtin_ones() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[diagnosis.sensors]]
name = "A"
mean = 10.0
std_dev = 1.0

[[diagnosis.sensors]]
name = "B"
mean = 0.0
std_dev = 0.0

[[diagnosis.groups]]
name = "Left"
priority = 2
members = ["A"]

[[diagnosis.groups]]
name = "Right"
priority = 1
members = ["B"]

[[diagnosis.rules]]
cause = "Right"
effect = "Left"
explanation = "Right drives left."
"#
    )
    .unwrap();

    let config = AdvisorConfig::load_from_file(file.path()).unwrap();
    let tables = DiagnosisTables::from_config(&config.diagnosis).unwrap();
    assert_eq!(tables.sensors().len(), 2);
    assert_eq!(tables.groups().len(), 2);
    assert_eq!(tables.rule("Right", "Left"), Some("Right drives left."));
    assert_eq!(tables.rule("Left", "Right"), None);
}

#[test]
fn invalid_tables_in_file_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[diagnosis.sensors]]
name = "A"
mean = 1.0
std_dev = -1.0
"#
    )
    .unwrap();

    match AdvisorConfig::load_from_file(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("std_dev")), "{errors:?}");
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

// ============================================================================
// Search Order and Overrides
// ============================================================================

/// Environment lookup backed by a fixed map instead of the process env.
fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn overrides_replace_file_values() {
    let mut config = AdvisorConfig::default();
    config.apply_overrides_from(env_from(&[
        ("CNC_DIAGNOSIS_ADDR", "127.0.0.1:18001"),
        ("CNC_CHAT_ADDR", "127.0.0.1:14002"),
        ("CNC_CORS_ORIGINS", " http://a.local , ,http://b.local,"),
        ("CNC_LLM_BASE_URL", "http://localhost:11434/v1"),
        ("CNC_LLM_MODEL", "llama3"),
    ]));

    assert_eq!(config.server.diagnosis_addr, "127.0.0.1:18001");
    assert_eq!(config.server.chat_addr, "127.0.0.1:14002");
    assert_eq!(
        config.server.cors_origins,
        vec!["http://a.local".to_string(), "http://b.local".to_string()]
    );
    assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
    assert_eq!(config.llm.model, "llama3");
}

#[test]
fn no_overrides_leaves_config_untouched() {
    let mut config = AdvisorConfig::default();
    config.apply_overrides_from(env_from(&[]));

    assert_eq!(config.server.diagnosis_addr, "0.0.0.0:8001");
    assert_eq!(config.server.chat_addr, "0.0.0.0:4002");
    assert!(config.server.cors_origins.is_empty());
    assert_eq!(config.llm.model, "gpt-4o-mini");
}

#[test]
fn explicit_bad_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_file(dir.path(), "bad.toml", "[llm\nmodel = ");
    let local = dir.path().join("cnc_advisor.toml");

    let result = AdvisorConfig::load_from_sources(Some(&bad), &local, env_from(&[]));
    assert!(matches!(result, Err(ConfigError::Parse(ref p, _)) if *p == bad));

    let missing = dir.path().join("absent.toml");
    let result = AdvisorConfig::load_from_sources(Some(&missing), &local, env_from(&[]));
    assert!(matches!(result, Err(ConfigError::Io(_, _))));
}

#[test]
fn config_env_path_must_load() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_file(dir.path(), "bad.toml", "not toml at all [");
    let local = write_file(dir.path(), "cnc_advisor.toml", "[llm]\nmodel = \"local-model\"\n");

    let env = env_from(&[("CNC_CONFIG", bad.to_str().unwrap())]);
    assert!(AdvisorConfig::load_from_sources(None, &local, env).is_err());
}

#[test]
fn config_env_path_wins_over_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let named = write_file(dir.path(), "named.toml", "[llm]\nmodel = \"named-model\"\n");
    let local = write_file(dir.path(), "cnc_advisor.toml", "[llm]\nmodel = \"local-model\"\n");

    let env = env_from(&[("CNC_CONFIG", named.to_str().unwrap())]);
    let config = AdvisorConfig::load_from_sources(None, &local, env).unwrap();
    assert_eq!(config.llm.model, "named-model");
}

#[test]
fn local_file_is_used_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let local = write_file(dir.path(), "cnc_advisor.toml", "[server]\nchat_addr = \"127.0.0.1:5000\"\n");

    let config = AdvisorConfig::load_from_sources(None, &local, env_from(&[])).unwrap();
    assert_eq!(config.server.chat_addr, "127.0.0.1:5000");
}

#[test]
fn broken_local_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let local = write_file(dir.path(), "cnc_advisor.toml", "[server\nchat_addr = ");

    let config = AdvisorConfig::load_from_sources(None, &local, env_from(&[])).unwrap();
    assert_eq!(config.server.chat_addr, "0.0.0.0:4002");
    assert_eq!(config.diagnosis.sensors.len(), 10);
}

#[test]
fn missing_local_file_uses_defaults_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("cnc_advisor.toml");

    let env = env_from(&[("CNC_DIAGNOSIS_ADDR", "127.0.0.1:9001")]);
    let config = AdvisorConfig::load_from_sources(None, &local, env).unwrap();
    assert_eq!(config.server.diagnosis_addr, "127.0.0.1:9001");
    assert_eq!(config.llm.model, "gpt-4o-mini");
}

#[test]
fn override_can_repair_an_invalid_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "empty_model.toml", "[llm]\nmodel = \"\"\n");
    let local = dir.path().join("cnc_advisor.toml");

    // On its own the file does not validate
    assert!(matches!(
        AdvisorConfig::load_from_file(&path),
        Err(ConfigError::Validation(_))
    ));

    let env = env_from(&[("CNC_LLM_MODEL", "gpt-4o")]);
    let config = AdvisorConfig::load_from_sources(Some(&path), &local, env).unwrap();
    assert_eq!(config.llm.model, "gpt-4o");

    // Without the override the same load fails validation
    let result = AdvisorConfig::load_from_sources(Some(&path), &local, env_from(&[]));
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 1, "{errors:?}");
            assert!(errors[0].contains("llm.model"));
        }
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

// ============================================================================
// Table Consistency
// ============================================================================

#[test]
fn builtin_tables_are_consistent() {
    assert!(validate_tables(&DiagnosisConfig::default()).is_empty());
}

#[test]
fn group_with_unknown_member_is_reported() {
    let mut tables = DiagnosisConfig::default();
    tables.groups.push(SensorGroup {
        name: "Coolant".to_string(),
        priority: 7,
        members: vec!["C_Flow".to_string()],
    });

    let errors = validate_tables(&tables);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("C_Flow"));
}

#[test]
fn rule_with_unknown_group_is_reported() {
    let mut tables = DiagnosisConfig::default();
    tables.rules.push(CorrelationRule {
        cause: "Coolant".to_string(),
        effect: "Feed".to_string(),
        explanation: "Coolant loss slows feed.".to_string(),
    });

    let errors = validate_tables(&tables);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("unknown group 'Coolant'"));
}

#[test]
fn duplicate_rule_pair_is_reported() {
    let mut tables = DiagnosisConfig::default();
    let first = tables.rules[0].clone();
    tables.rules.push(first);

    let errors = validate_tables(&tables);
    assert!(errors.iter().any(|e| e.contains("duplicate rule")), "{errors:?}");
}

#[test]
fn all_problems_are_collected() {
    let mut tables = DiagnosisConfig::default();
    tables.sensors[0].std_dev = -2.0;
    tables.sensors[1].mean = f64::NAN;
    tables.groups[0].members.clear();

    let errors = validate_tables(&tables);
    assert!(errors.len() >= 3, "{errors:?}");
}
