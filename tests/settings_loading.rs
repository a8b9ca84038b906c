//! Integration tests for loading notifier settings.

#![allow(unsafe_code)] // For env var manipulation in tests

use change_notifier::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Serializes every test that reads or writes the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_load_yaml_file() {
    let _env = env_guard();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notifier.yaml");
    fs::write(
        &path,
        r#"
name: orders
log_failures: false
"#,
    )
    .unwrap();

    let config = NotifierConfig::load(Some(path.as_path()), "CN_TEST_YAML").unwrap();
    assert_eq!(config.name, "orders");
    assert!(!config.log_failures);

    let notifier = ChangeNotifier::from_config(config).unwrap();
    assert_eq!(notifier.name(), "orders");
}

#[test]
fn test_load_json_file() {
    let _env = env_guard();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notifier.json");
    fs::write(&path, r#"{ "name": "audit" }"#).unwrap();

    let config = NotifierConfig::load(Some(path.as_path()), "CN_TEST_JSON").unwrap();
    assert_eq!(config.name, "audit");
    assert!(config.log_failures);
}

#[test]
fn test_env_overrides_file() {
    let _env = env_guard();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notifier.toml");
    fs::write(
        &path,
        r#"
name = "from-file"
log_failures = true
"#,
    )
    .unwrap();

    unsafe {
        std::env::set_var("CN_TEST_OVERRIDE_NAME", "from-env");
        std::env::set_var("CN_TEST_OVERRIDE_LOG_FAILURES", "false");
    }

    let config = NotifierConfig::load(Some(path.as_path()), "CN_TEST_OVERRIDE").unwrap();

    unsafe {
        std::env::remove_var("CN_TEST_OVERRIDE_NAME");
        std::env::remove_var("CN_TEST_OVERRIDE_LOG_FAILURES");
    }

    assert_eq!(config.name, "from-env");
    assert!(!config.log_failures);
}

#[test]
fn test_env_only() {
    let _env = env_guard();
    unsafe {
        std::env::set_var("CN_TEST_ENVONLY_NAME", "env-notifier");
    }

    let config = NotifierConfig::load(None, "CN_TEST_ENVONLY").unwrap();

    unsafe {
        std::env::remove_var("CN_TEST_ENVONLY_NAME");
    }

    assert_eq!(config.name, "env-notifier");
    assert!(config.log_failures);
}

#[test]
fn test_no_sources_yields_defaults() {
    let _env = env_guard();
    let config = NotifierConfig::load(None, "CN_TEST_NOTHING_SET").unwrap();
    assert_eq!(config, NotifierConfig::default());
}

#[cfg(feature = "validation")]
#[test]
fn test_invalid_name_rejected() {
    let _env = env_guard();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notifier.yaml");
    fs::write(&path, "name: \"\"\n").unwrap();

    let result = NotifierConfig::load(Some(path.as_path()), "CN_TEST_INVALID");
    assert!(matches!(result, Err(ObserveError::ValidationError(_))));
}

#[test]
fn test_wrong_type_rejected() {
    let _env = env_guard();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notifier.yaml");
    fs::write(&path, "log_failures: [1, 2]\n").unwrap();

    let result = NotifierConfig::load(Some(path.as_path()), "CN_TEST_WRONG_TYPE");
    assert!(matches!(result, Err(ObserveError::DeserializationError(_))));
}

#[test]
fn test_missing_file_rejected() {
    let _env = env_guard();
    let result = NotifierConfig::load(
        Some(Path::new("/nonexistent/notifier.yaml")),
        "CN_TEST_MISSING",
    );
    assert!(matches!(result, Err(ObserveError::LoadError(_))));
}
