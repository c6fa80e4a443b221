//! Configuration schema for the analyzer.
//!
//! This module defines the configuration structure and validation logic for
//! all user-configurable settings: the default filter, the default sort and
//! how transaction details are rendered.

use crate::models::{ContentCategory, StatusClass};
use crate::query::{SortKey, DEFAULT_METHODS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has a value outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("Failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main configuration structure for the analyzer.
///
/// All settings can be given under the "har-analyzer" key of a JSON settings
/// document. Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Methods included when a trace is loaded.
    ///
    /// Defaults to GET, POST, PUT, DELETE and PATCH. Other methods are
    /// hidden until added to the filter.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    /// Status classes included when a trace is loaded. Defaults to all four.
    #[serde(default = "default_status_classes")]
    pub status_classes: Vec<StatusClass>,

    /// Content categories included when a trace is loaded. Defaults to all six.
    #[serde(default = "default_content_categories")]
    pub content_categories: Vec<ContentCategory>,

    /// Sort key applied when a trace is loaded. Defaults to none (log order).
    #[serde(default)]
    pub default_sort: Option<SortKey>,

    /// Whether JSON bodies are pretty-printed in transaction details.
    ///
    /// Defaults to true. Bodies that fail to parse are shown raw either way.
    #[serde(default = "default_pretty_print_bodies")]
    pub pretty_print_bodies: bool,

    /// Maximum number of characters of a body shown in details.
    ///
    /// Defaults to 10000. Must be greater than 0.
    #[serde(default = "default_body_preview_limit")]
    pub body_preview_limit: usize,

    /// `strftime`-style format used for start timestamps in details.
    ///
    /// Defaults to "%Y-%m-%d %H:%M:%S". Must not be empty.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            methods: default_methods(),
            status_classes: default_status_classes(),
            content_categories: default_content_categories(),
            default_sort: None,
            pretty_print_bodies: default_pretty_print_bodies(),
            body_preview_limit: default_body_preview_limit(),
            date_format: default_date_format(),
        }
    }
}

impl AnalyzerConfig {
    /// Validates the configuration.
    ///
    /// Empty inclusion lists are allowed: they simply hide every transaction.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` describing the first
    /// invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_preview_limit == 0 {
            return Err(ConfigError::Invalid(
                "bodyPreviewLimit must be greater than 0".to_string(),
            ));
        }

        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dateFormat must not be empty".to_string(),
            ));
        }

        if let Some(method) = self.methods.iter().find(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "methods must not contain blank entries (got {:?})",
                method
            )));
        }

        Ok(())
    }
}

// Default value functions for serde

fn default_methods() -> Vec<String> {
    DEFAULT_METHODS.iter().map(|m| m.to_string()).collect()
}

fn default_status_classes() -> Vec<StatusClass> {
    StatusClass::ALL.to_vec()
}

fn default_content_categories() -> Vec<ContentCategory> {
    ContentCategory::ALL.to_vec()
}

fn default_pretty_print_bodies() -> bool {
    true
}

fn default_body_preview_limit() -> usize {
    10_000
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}
