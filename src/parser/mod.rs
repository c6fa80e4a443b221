//! HAR trace parser.
//!
//! This module validates a HAR document at the ingestion boundary and turns
//! it into a typed [`TransactionLog`]. Structural problems (no `log`, no
//! `entries`, an entry without a request or response) are fatal and reported
//! as [`ParseError`]. Cosmetic problems inside an entry (an unparseable
//! timestamp, a non-numeric timing phase or size, a text field holding a
//! number or an object) are recovered with a fallback value and logged.

pub mod error;
mod schema;

pub use error::ParseError;

use crate::models::{
    Creator, NameValuePair, PostData, Request, Response, ResponseContent, Timings, Transaction,
    TransactionLog,
};
use chrono::DateTime;
use log::{debug, info};
use schema::{RawContent, RawCreator, RawEntry, RawPair, RawPostData, RawRequest, RawResponse};
use serde_json::Value;

/// Parses the text of a HAR document into a transaction log.
///
/// # Arguments
///
/// * `content` - The full text of the `.har` file
///
/// # Returns
///
/// The parsed `TransactionLog`, or a `ParseError` if the document is not
/// JSON or is structurally invalid.
///
/// # Examples
///
/// ```
/// use har_analyzer::parser::parse_har;
///
/// let har = r#"{
///   "log": {
///     "entries": [{
///       "startedDateTime": "2024-01-01T00:00:00.000Z",
///       "request": { "method": "GET", "url": "https://example.com/", "headers": [] },
///       "response": { "status": 200, "statusText": "OK", "headers": [], "content": { "size": 12 } },
///       "timings": { "wait": 20, "receive": 5 }
///     }]
///   }
/// }"#;
///
/// let log = parse_har(har).unwrap();
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.entries[0].total_duration(), 25.0);
/// ```
pub fn parse_har(content: &str) -> Result<TransactionLog, ParseError> {
    let document: Value = serde_json::from_str(content)?;
    parse_har_value(document)
}

/// Parses an already-decoded JSON document into a transaction log.
///
/// Use this when the caller decoded the JSON itself (for example when the
/// trace is embedded in a larger document).
pub fn parse_har_value(document: Value) -> Result<TransactionLog, ParseError> {
    let mut log = match document {
        Value::Object(mut root) => match root.remove("log") {
            Some(Value::Object(log)) => log,
            _ => return Err(ParseError::MissingLog),
        },
        _ => return Err(ParseError::MissingLog),
    };

    let raw_entries = match log.remove("entries") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(ParseError::MissingEntries),
    };

    let entries = raw_entries
        .into_iter()
        .enumerate()
        .map(|(index, raw)| parse_entry(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let version = log
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);
    let creator = log
        .remove("creator")
        .and_then(|value| serde_json::from_value::<RawCreator>(value).ok())
        .map(|raw| Creator {
            name: raw.name.unwrap_or_default(),
            version: raw.version.unwrap_or_default(),
        });

    info!("Parsed trace with {} transactions", entries.len());

    Ok(TransactionLog {
        version,
        creator,
        entries,
    })
}

/// Validates and converts one entry of `log.entries`.
fn parse_entry(index: usize, raw: Value) -> Result<Transaction, ParseError> {
    let entry: RawEntry =
        serde_json::from_value(raw).map_err(|e| ParseError::InvalidEntry {
            index,
            reason: e.to_string(),
        })?;

    let started_date_time =
        lenient_string(index, "startedDateTime", entry.started_date_time).unwrap_or_default();
    let started_at = match DateTime::parse_from_rfc3339(&started_date_time) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(
                "Entry {}: unparseable startedDateTime '{}': {}",
                index, started_date_time, e
            );
            None
        }
    };

    Ok(Transaction {
        started_date_time,
        started_at,
        request: convert_request(index, entry.request),
        response: convert_response(index, entry.response)?,
        timings: convert_timings(index, entry.timings),
    })
}

fn convert_request(index: usize, raw: RawRequest) -> Request {
    Request {
        method: raw.method,
        url: raw.url,
        http_version: lenient_string(index, "request.httpVersion", raw.http_version),
        headers: convert_pairs(index, "request.headers", raw.headers),
        query_string: convert_pairs(index, "request.queryString", raw.query_string),
        cookies: convert_pairs(index, "request.cookies", raw.cookies),
        post_data: raw
            .post_data
            .filter(|value| !value.is_null())
            .map(|value| convert_post_data(index, value)),
    }
}

fn convert_post_data(index: usize, value: Value) -> PostData {
    let raw: RawPostData = lenient_object(index, "request.postData", value);
    PostData {
        mime_type: lenient_string(index, "request.postData.mimeType", raw.mime_type),
        text: lenient_string(index, "request.postData.text", raw.text),
        params: convert_pairs(index, "request.postData.params", raw.params),
    }
}

fn convert_response(index: usize, raw: RawResponse) -> Result<Response, ParseError> {
    let status = raw
        .status
        .as_f64()
        .filter(|code| code.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(code))
        .map(|code| code as u16)
        .ok_or_else(|| ParseError::InvalidEntry {
            index,
            reason: format!("response.status is not a status code: {}", raw.status),
        })?;

    Ok(Response {
        status,
        status_text: lenient_string(index, "response.statusText", raw.status_text)
            .unwrap_or_default(),
        headers: convert_pairs(index, "response.headers", raw.headers),
        content: raw
            .content
            .map(|content| convert_content(index, content))
            .unwrap_or_default(),
        body_size: lenient_size(index, "response.bodySize", raw.body_size),
    })
}

fn convert_content(index: usize, value: Value) -> ResponseContent {
    let raw: RawContent = lenient_object(index, "response.content", value);
    ResponseContent {
        size: lenient_size(index, "response.content.size", raw.size),
        mime_type: lenient_string(index, "response.content.mimeType", raw.mime_type),
        text: lenient_string(index, "response.content.text", raw.text),
        encoding: lenient_string(index, "response.content.encoding", raw.encoding),
    }
}

/// Decodes an optional object, falling back to an empty one.
fn lenient_object<T>(index: usize, field: &str, value: Value) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        debug!("Entry {}: ignoring malformed {}: {}", index, field, e);
        T::default()
    })
}

/// Reads a text field. Non-string values are stringified.
fn lenient_string(index: usize, field: &str, value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            debug!("Entry {}: {} is not a string: {}", index, field, other);
            Some(other.to_string())
        }
    }
}

/// Reads a byte count, dropping values that are not numbers.
fn lenient_size(index: usize, field: &str, value: Option<Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => {
            let size = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64));
            if size.is_none() {
                debug!("Entry {}: ignoring non-numeric {}: {}", index, field, value);
            }
            size
        }
    }
}

fn convert_timings(index: usize, raw: Option<Value>) -> Timings {
    let mut timings = Timings::new();

    let phases = match raw {
        None | Some(Value::Null) => return timings,
        Some(Value::Object(phases)) => phases,
        Some(other) => {
            debug!("Entry {}: ignoring malformed timings: {}", index, other);
            return timings;
        }
    };

    for (name, value) in phases {
        if name == "comment" {
            continue;
        }
        match value.as_f64() {
            Some(millis) => timings.set_phase(&name, millis),
            None => debug!(
                "Entry {}: ignoring non-numeric timing phase '{}': {}",
                index, name, value
            ),
        }
    }

    timings
}

/// Reads a list of name/value pairs. Elements that are not objects are
/// skipped; a value that is not a list yields no pairs.
fn convert_pairs(index: usize, field: &str, raw: Option<Value>) -> Vec<NameValuePair> {
    let items = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            debug!("Entry {}: {} is not a list: {}", index, field, other);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawPair>(item) {
            Ok(pair) => Some(NameValuePair {
                name: lenient_string(index, field, pair.name).unwrap_or_default(),
                value: lenient_string(index, field, pair.value).unwrap_or_default(),
            }),
            Err(e) => {
                debug!("Entry {}: skipping malformed item in {}: {}", index, field, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentCategory;
    use serde_json::json;

    fn entry(method: &str, url: &str, status: u16) -> Value {
        json!({
            "startedDateTime": "2024-05-01T12:00:00.000Z",
            "request": {
                "method": method,
                "url": url,
                "httpVersion": "HTTP/1.1",
                "headers": [{ "name": "Accept", "value": "*/*" }],
                "queryString": [],
                "cookies": []
            },
            "response": {
                "status": status,
                "statusText": "OK",
                "headers": [{ "name": "Content-Type", "value": "text/html" }],
                "content": { "size": 1024, "mimeType": "text/html", "text": "<html></html>" },
                "bodySize": 300
            },
            "timings": { "blocked": -1, "dns": -1, "connect": 4, "send": 1, "wait": 30, "receive": 2 }
        })
    }

    #[test]
    fn test_parse_complete_entry() {
        let doc = json!({
            "log": {
                "version": "1.2",
                "creator": { "name": "WebInspector", "version": "537.36" },
                "entries": [entry("GET", "https://example.com/", 200)]
            }
        });

        let log = parse_har_value(doc).unwrap();
        assert_eq!(log.version.as_deref(), Some("1.2"));
        assert_eq!(log.creator.as_ref().map(|c| c.name.as_str()), Some("WebInspector"));

        let transaction = &log.entries[0];
        assert_eq!(transaction.method(), "GET");
        assert_eq!(transaction.request.http_version.as_deref(), Some("HTTP/1.1"));
        assert_eq!(transaction.request.headers[0].name, "Accept");
        assert!(transaction.started_at.is_some());
        assert_eq!(transaction.effective_size(), 1024);
        assert_eq!(transaction.content_category(), ContentCategory::Html);
        assert_eq!(transaction.total_duration(), 37.0);
    }

    #[test]
    fn test_parse_har_text() {
        let text =
            json!({ "log": { "entries": [entry("POST", "https://a.test/x", 201)] } }).to_string();
        let log = parse_har(&text).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].status(), 201);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_har("not json"), Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_missing_log() {
        assert!(matches!(
            parse_har_value(json!({ "entries": [] })),
            Err(ParseError::MissingLog)
        ));
        assert!(matches!(parse_har_value(json!([])), Err(ParseError::MissingLog)));
        assert!(matches!(
            parse_har_value(json!({ "log": null })),
            Err(ParseError::MissingLog)
        ));
        assert!(matches!(
            parse_har_value(json!({ "log": [] })),
            Err(ParseError::MissingLog)
        ));
        assert!(matches!(
            parse_har_value(json!({ "log": "1.2" })),
            Err(ParseError::MissingLog)
        ));
    }

    #[test]
    fn test_missing_entries() {
        assert!(matches!(
            parse_har_value(json!({ "log": { "version": "1.2" } })),
            Err(ParseError::MissingEntries)
        ));
        assert!(matches!(
            parse_har_value(json!({ "log": { "entries": {} } })),
            Err(ParseError::MissingEntries)
        ));
    }

    #[test]
    fn test_empty_entries_is_valid() {
        let log = parse_har_value(json!({ "log": { "entries": [] } })).unwrap();
        assert!(log.is_empty());
        assert!(log.creator.is_none());
    }

    #[test]
    fn test_entry_without_response_is_rejected() {
        let doc = json!({
            "log": {
                "entries": [
                    entry("GET", "https://example.com/", 200),
                    { "request": { "method": "GET", "url": "https://example.com/2" } }
                ]
            }
        });

        let err = parse_har_value(doc).unwrap_err();
        assert_eq!(err.entry_index(), Some(1));
        assert!(format!("{}", err).contains("response"));
    }

    #[test]
    fn test_non_numeric_status_is_rejected() {
        let mut bad = entry("GET", "https://example.com/", 200);
        bad["response"]["status"] = json!("two hundred");
        let doc = json!({ "log": { "entries": [bad] } });

        let err = parse_har_value(doc).unwrap_err();
        assert_eq!(err.entry_index(), Some(0));
    }

    #[test]
    fn test_field_level_fallbacks() {
        let doc = json!({
            "log": {
                "entries": [{
                    "startedDateTime": "not a date",
                    "request": { "method": "GET", "url": "https://example.com/" },
                    "response": {
                        "status": 204,
                        "content": { "size": "unknown" },
                        "bodySize": -1
                    },
                    "timings": { "wait": 8, "receive": "fast", "comment": "cached" }
                }]
            }
        });

        let log = parse_har_value(doc).unwrap();
        let transaction = &log.entries[0];
        assert_eq!(transaction.started_date_time, "not a date");
        assert!(transaction.started_at.is_none());
        assert!(transaction.request.headers.is_empty());
        assert!(transaction.response.headers.is_empty());
        assert_eq!(transaction.response.status_text, "");
        assert_eq!(transaction.response.content.size, None);
        assert_eq!(transaction.response.body_size, Some(-1));
        assert_eq!(transaction.effective_size(), 0);
        assert_eq!(transaction.timings.receive, None);
        assert_eq!(transaction.total_duration(), 8.0);
    }

    #[test]
    fn test_mistyped_text_fields_are_recovered() {
        let doc = json!({
            "log": {
                "entries": [{
                    "startedDateTime": 1700000000,
                    "request": {
                        "method": "GET",
                        "url": "https://example.com/",
                        "httpVersion": 2,
                        "headers": [{ "name": 42, "value": "x" }, "garbage"],
                        "cookies": "session=abc",
                        "postData": "raw"
                    },
                    "response": {
                        "status": 200,
                        "statusText": true,
                        "headers": { "Content-Type": "application/json" },
                        "content": { "mimeType": ["text/plain"], "text": { "id": 1 } }
                    },
                    "timings": [1, 2, 3]
                }]
            }
        });

        let log = parse_har_value(doc).unwrap();
        let transaction = &log.entries[0];
        assert_eq!(transaction.started_date_time, "1700000000");
        assert!(transaction.started_at.is_none());
        assert_eq!(transaction.request.http_version.as_deref(), Some("2"));
        assert_eq!(transaction.request.headers, vec![NameValuePair::new("42", "x")]);
        assert!(transaction.request.cookies.is_empty());
        assert_eq!(transaction.request.post_data, Some(PostData::default()));
        assert_eq!(transaction.response.status_text, "true");
        assert!(transaction.response.headers.is_empty());
        assert_eq!(transaction.response.content.text.as_deref(), Some(r#"{"id":1}"#));
        assert_eq!(transaction.total_duration(), 0.0);
    }

    #[test]
    fn test_malformed_content_object_falls_back() {
        let mut odd = entry("GET", "https://example.com/", 200);
        odd["response"]["content"] = json!("n/a");
        let doc = json!({ "log": { "entries": [odd] } });

        let log = parse_har_value(doc).unwrap();
        assert_eq!(log.entries[0].response.content, ResponseContent::default());
        assert_eq!(log.entries[0].effective_size(), 300);
    }

    #[test]
    fn test_post_data_and_cookies() {
        let doc = json!({
            "log": {
                "entries": [{
                    "startedDateTime": "2024-05-01T12:00:00Z",
                    "request": {
                        "method": "POST",
                        "url": "https://example.com/login",
                        "headers": [],
                        "cookies": [{ "name": "session", "value": "abc" }],
                        "queryString": [{ "name": "next", "value": "/home" }],
                        "postData": {
                            "mimeType": "application/x-www-form-urlencoded",
                            "params": [
                                { "name": "user", "value": "alice" },
                                { "name": "remember", "value": true }
                            ]
                        }
                    },
                    "response": { "status": 302, "headers": [] }
                }]
            }
        });

        let log = parse_har_value(doc).unwrap();
        let request = &log.entries[0].request;
        assert_eq!(request.cookies, vec![NameValuePair::new("session", "abc")]);
        assert_eq!(request.query_string, vec![NameValuePair::new("next", "/home")]);

        let post_data = request.post_data.as_ref().unwrap();
        assert!(post_data.text.is_none());
        assert_eq!(post_data.params[1], NameValuePair::new("remember", "true"));
    }
}
