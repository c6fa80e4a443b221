//! Request and response body formatting.
//!
//! Bodies are shown pretty-printed when they are JSON and raw otherwise.
//! Formatting never fails from the caller's point of view: every
//! [`FormatError`] is turned into the raw-text fallback here.

use crate::models::{PostData, ResponseContent};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while formatting a body.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The body is not valid JSON.
    #[error("JSON formatting error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is marked base64 but does not decode.
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded body is not UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Formats JSON with pretty-printing using 2-space indentation.
///
/// Object keys keep the order they have in the input.
///
/// # Returns
///
/// `Ok(String)` with the formatted JSON, or `Err(FormatError)` if the input
/// is not JSON, so the caller can fall back to raw display.
///
/// # Examples
///
/// ```
/// use har_analyzer::formatter::format_json_pretty;
///
/// let formatted = format_json_pretty(r#"{"name":"John","age":30}"#).unwrap();
/// assert_eq!(formatted, "{\n  \"name\": \"John\",\n  \"age\": 30\n}");
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    let value: Value = serde_json::from_str(json)?;

    // Formatted output is usually ~1.5x the compact input
    let mut buf = Vec::with_capacity(json.len() + json.len() / 2);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf)?)
}

/// Formats a posted request body for display.
///
/// # Arguments
///
/// * `post_data` - The posted body
/// * `pretty` - Whether JSON text should be pretty-printed
///
/// # Returns
///
/// The body text (pretty-printed when it parses as JSON), or the form
/// parameters as `name=value` lines when no text was captured, or an empty
/// string when there is neither.
pub fn format_request_body(post_data: &PostData, pretty: bool) -> String {
    match post_data.text.as_deref() {
        Some(text) if !text.is_empty() => pretty_or_raw(text, pretty),
        _ => post_data
            .params
            .iter()
            .map(|param| format!("{}={}", param.name, param.value))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Formats a response body for display.
///
/// Base64 bodies are decoded first. Only bodies whose MIME type contains
/// `application/json` are pretty-printed; everything else is shown as is.
///
/// # Returns
///
/// The formatted body, an empty string when no text was captured, or a
/// `[binary content, N bytes]` placeholder for decoded bodies that are not
/// UTF-8.
pub fn format_response_body(content: &ResponseContent, pretty: bool) -> String {
    let text = match content.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => return String::new(),
    };

    let decoded = if is_base64(content) {
        match decode_base64(text) {
            Ok(decoded) => decoded,
            Err(FormatError::Encoding(e)) => {
                return format!("[binary content, {} bytes]", e.as_bytes().len());
            }
            Err(e) => {
                warn!("Showing undecoded response body: {}", e);
                text.to_string()
            }
        }
    } else {
        text.to_string()
    };

    let is_json = content
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.contains("application/json"));

    if is_json {
        pretty_or_raw(&decoded, pretty)
    } else {
        decoded
    }
}

fn is_base64(content: &ResponseContent) -> bool {
    content
        .encoding
        .as_deref()
        .is_some_and(|encoding| encoding.eq_ignore_ascii_case("base64"))
}

fn decode_base64(text: &str) -> Result<String, FormatError> {
    let bytes = STANDARD.decode(text.trim())?;
    Ok(String::from_utf8(bytes)?)
}

fn pretty_or_raw(text: &str, pretty: bool) -> String {
    if !pretty {
        return text.to_string();
    }

    format_json_pretty(text).unwrap_or_else(|e| {
        debug!("Body shown raw: {}", e);
        text.to_string()
    })
}
