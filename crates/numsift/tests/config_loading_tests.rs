//! Configuration loading integration tests.
//!
//! Loads run configuration from each supported format and drives a filter run
//! with it.

use numsift::filter::{FilterCategory, run_filter_sync};
use numsift::patterns::{PatternKind, SpecialKind};
use numsift::{NumsiftConfig, NumsiftError, extract_bytes};
use std::fs;
use tempfile::tempdir;

const SOURCE: &[u8] = b"9876543210,9123456786,7860000123,8000011111,6767676767\n";

/// Test a TOML config driving an ending-pattern filter.
#[test]
fn test_toml_config_drives_filter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numsift.toml");
    fs::write(
        &path,
        r#"
chunk_size = 8
batch_size = 2

[filter]
active = ["pattern"]
pattern = "ending"
ending = "786"
"#,
    )
    .unwrap();

    let config = NumsiftConfig::from_file(&path).unwrap();
    config.validate().unwrap();

    let extracted = extract_bytes(SOURCE, config.chunk_size).unwrap();
    let result = run_filter_sync(&extracted.tokens, &config.filter, config.batch_size, |_| {})
        .unwrap()
        .into_result()
        .unwrap();

    let numbers: Vec<&str> = result.tokens.iter().map(|t| t.as_str()).collect();
    assert_eq!(numbers, vec!["9123456786"]);
}

/// Test a YAML config selecting the xy special type.
#[test]
fn test_yaml_config_special_xy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numsift.yml");
    fs::write(&path, "filter:\n  active: [special]\n  special: xy\n").unwrap();

    let config = NumsiftConfig::from_file(&path).unwrap();
    assert_eq!(config.filter.special, SpecialKind::Xy);
    assert_eq!(config.filter.pattern, PatternKind::Mirror, "Unset fields keep their defaults");

    let extracted = extract_bytes(SOURCE, 64).unwrap();
    let result = run_filter_sync(&extracted.tokens, &config.filter, config.batch_size, |_| {})
        .unwrap()
        .into_result()
        .unwrap();

    let numbers: Vec<&str> = result.tokens.iter().map(|t| t.as_str()).collect();
    assert_eq!(numbers, vec!["6767676767"]);
}

/// Test a JSON config with digit preferences and a single-digit sum.
#[test]
fn test_json_config_preferences_and_sum() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numsift.json");
    fs::write(
        &path,
        r#"{
  "filter": {
    "active": ["preference", "sum"],
    "lucky": ["1"],
    "unlucky": ["2"],
    "target_sum": "4",
    "single_digit_sum": true
  }
}"#,
    )
    .unwrap();

    let config = NumsiftConfig::from_file(&path).unwrap();
    assert!(config.filter.is_active(FilterCategory::Preference));
    assert!(config.filter.single_digit_sum);

    let extracted = extract_bytes(SOURCE, 64).unwrap();
    let result = run_filter_sync(&extracted.tokens, &config.filter, config.batch_size, |_| {})
        .unwrap()
        .into_result()
        .unwrap();

    let numbers: Vec<&str> = result.tokens.iter().map(|t| t.as_str()).collect();
    assert_eq!(numbers, vec!["8000011111"]);
}

/// Test that an unknown pattern name is rejected at load time.
#[test]
fn test_unknown_pattern_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numsift.toml");
    fs::write(&path, "[filter]\npattern = \"spiral\"\n").unwrap();

    let err = NumsiftConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, NumsiftError::Validation { .. }));
}

/// Test that a non-digit preference loaded from a file fails the run.
#[test]
fn test_non_digit_preference_fails_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numsift.json");
    fs::write(&path, r#"{"filter": {"active": ["preference"], "lucky": ["a"]}}"#).unwrap();

    let config = NumsiftConfig::from_file(&path).unwrap();
    let extracted = extract_bytes(SOURCE, 64).unwrap();
    let err = run_filter_sync(&extracted.tokens, &config.filter, config.batch_size, |_| {}).unwrap_err();
    assert!(matches!(err, NumsiftError::Validation { .. }));
}
