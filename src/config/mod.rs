//! Configuration management for the analyzer.
//!
//! This module provides configuration loading and validation. Settings are
//! read from the "har-analyzer" key of a JSON settings document and merged
//! with defaults. There is no global configuration: callers own the value
//! and hand it to the [`QuerySession`](crate::query::QuerySession) they build.

pub mod schema;

pub use schema::{AnalyzerConfig, ConfigError};

use log::warn;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Key under which analyzer settings live in a settings document.
pub const SETTINGS_KEY: &str = "har-analyzer";

/// Loads configuration from a JSON settings value.
///
/// Reads the "har-analyzer" settings, falls back to defaults if they cannot
/// be decoded and validates the result.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing settings under the "har-analyzer" key
///
/// # Returns
///
/// `Ok(AnalyzerConfig)` with the loaded configuration, or `Err` if validation fails.
///
/// # Example
///
/// ```
/// use har_analyzer::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "har-analyzer": {
///         "methods": ["GET"],
///         "prettyPrintBodies": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.methods, vec!["GET"]);
/// assert!(!config.pretty_print_bodies);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<AnalyzerConfig, ConfigError> {
    let mut config = AnalyzerConfig::default();

    if let Some(settings) = settings_json {
        if let Some(analyzer_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<AnalyzerConfig>(analyzer_settings.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config.validate()?;

    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// Unlike [`load_config`], a file that is unreadable or not JSON at all is
/// an error; only a malformed "har-analyzer" section falls back to defaults.
pub fn load_config_file(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let settings: Value = serde_json::from_str(&content)?;
    load_config(Some(settings))
}
