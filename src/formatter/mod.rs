//! Display formatting for captured transactions.
//!
//! This module turns transaction values into text: human-readable sizes and
//! durations, pretty-printed bodies and the plain-text detail sections shown
//! for a selected transaction.

pub mod body;
pub mod details;

pub use body::{format_json_pretty, format_request_body, format_response_body, FormatError};
pub use details::{
    general_section, render_details, request_section, response_section, summary_line,
    timing_section,
};

use crate::models::Transaction;
use chrono::Local;
use log::debug;
use std::fmt::Write;

/// Size units used by [`format_bytes`], in scaling order.
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count in a human-readable format.
///
/// Scales by 1024 until the value fits the unit, stopping at GB. Every
/// scaled value keeps two decimal places.
///
/// # Examples
///
/// ```
/// use har_analyzer::formatter::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut exponent = 0;
    let mut threshold: u64 = 1024;
    while exponent < SIZE_UNITS.len() - 1 && bytes >= threshold {
        exponent += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{:.2} {}", scaled, SIZE_UNITS[exponent])
}

/// Formats a millisecond value the way the trace wrote it.
///
/// Whole numbers print without a fraction (`12`), others with the shortest
/// exact representation (`12.5`).
pub fn format_millis(millis: f64) -> String {
    if millis == 0.0 {
        // Avoids "-0"
        return "0".to_string();
    }
    format!("{}", millis)
}

/// Formats one timing phase.
///
/// # Returns
///
/// `"<ms>ms"` for a measured phase, or `"N/A"` when the phase is missing or
/// carries the negative "not applicable" sentinel.
pub fn format_phase(phase: Option<f64>) -> String {
    match phase {
        Some(millis) if millis >= 0.0 => format!("{}ms", format_millis(millis)),
        _ => "N/A".to_string(),
    }
}

/// Formats a total duration rounded to whole milliseconds (e.g. `"568ms"`).
pub fn format_total(millis: f64) -> String {
    format!("{}ms", format_millis(millis.round()))
}

/// Formats a transaction's start time in local time.
///
/// Falls back to the raw timestamp text when it did not parse or when
/// `date_format` is not a valid format string.
pub fn format_timestamp(transaction: &Transaction, date_format: &str) -> String {
    let Some(started_at) = transaction.started_at else {
        return transaction.started_date_time.clone();
    };

    let mut output = String::new();
    match write!(
        output,
        "{}",
        started_at.with_timezone(&Local).format(date_format)
    ) {
        Ok(()) => output,
        Err(_) => {
            debug!("Invalid date format '{}', showing raw timestamp", date_format);
            transaction.started_date_time.clone()
        }
    }
}
