//! Error types for trace parsing.
//!
//! This module defines the structural errors that can occur while turning a
//! HAR document into a [`TransactionLog`](crate::models::TransactionLog).
//! Field-level decoding problems are not represented here: they are
//! recovered inside the parser with a fallback value.

use thiserror::Error;

/// Structural errors that make a trace unusable.
///
/// Any of these aborts the whole load; no partial log is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not a JSON document.
    #[error("Trace is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document has no top-level `log` object.
    #[error("Invalid trace structure: missing top-level 'log' object")]
    MissingLog,

    /// The `log` object has no `entries` array.
    #[error("Invalid trace structure: 'log.entries' is missing or not an array")]
    MissingEntries,

    /// An entry lacks a required field or has a field of the wrong shape.
    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry {
        /// Position of the entry in `log.entries` (0-based)
        index: usize,
        /// Description of what is wrong with the entry
        reason: String,
    },
}

impl ParseError {
    /// Returns the index of the offending entry, if the error concerns one.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            ParseError::InvalidEntry { index, .. } => Some(*index),
            _ => None,
        }
    }
}
