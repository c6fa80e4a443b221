//! Settings file integration tests

use super::{entry, har_document, init_test_env};
use har_analyzer::config::{load_config_file, ConfigError};
use har_analyzer::query::{QuerySession, SortKey};
use std::fs;
use tempfile::TempDir;

fn write_settings(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, content).expect("Failed to write settings file");
    (temp_dir, path)
}

#[test]
fn test_settings_file_drives_session_defaults() {
    init_test_env();
    let (_temp_dir, path) = write_settings(
        r#"{
            "har-analyzer": {
                "methods": ["POST"],
                "defaultSort": "status"
            }
        }"#,
    );

    let config = load_config_file(&path).unwrap();
    assert_eq!(config.default_sort, Some(SortKey::Status));

    let mut session = QuerySession::new(&config);
    session
        .load_str(&har_document(vec![
            entry("POST", "https://example.com/a", 500, 1.0),
            entry("GET", "https://example.com/b", 200, 1.0),
            entry("POST", "https://example.com/c", 201, 1.0),
        ]))
        .unwrap();

    let statuses: Vec<u16> = session.transactions().map(|t| t.status()).collect();
    assert_eq!(statuses, vec![201, 500]);
}

#[test]
fn test_settings_file_not_json() {
    let (_temp_dir, path) = write_settings("methods = [\"GET\"]");
    assert!(matches!(load_config_file(&path), Err(ConfigError::Json(_))));
}

#[test]
fn test_settings_file_invalid_value() {
    let (_temp_dir, path) = write_settings(r#"{ "har-analyzer": { "dateFormat": "" } }"#);
    assert!(matches!(load_config_file(&path), Err(ConfigError::Invalid(_))));
}
