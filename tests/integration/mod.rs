//! Integration tests module for the HAR analyzer
//!
//! This module provides HAR fixtures and shared setup for the integration
//! tests.

pub mod config_file_test;
pub mod end_to_end_test;
pub mod properties_test;

use serde_json::{json, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Builds one HAR entry with a JSON-typed response and a `wait` timing.
pub fn entry(method: &str, url: &str, status: u16, wait: f64) -> Value {
    entry_with_type(method, url, status, "application/json", wait)
}

/// Builds one HAR entry with the given response `Content-Type`.
pub fn entry_with_type(
    method: &str,
    url: &str,
    status: u16,
    content_type: &str,
    wait: f64,
) -> Value {
    json!({
        "startedDateTime": "2024-03-01T12:00:00.000Z",
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
            "statusText": "",
            "headers": [{ "name": "Content-Type", "value": content_type }],
            "content": { "size": 128, "mimeType": content_type, "text": "{}" },
            "bodySize": 128
        },
        "timings": { "dns": -1, "connect": -1, "ssl": -1, "send": 1, "wait": wait, "receive": 1 }
    })
}

/// Wraps entries into a complete HAR document string.
pub fn har_document(entries: Vec<Value>) -> String {
    json!({
        "log": {
            "version": "1.2",
            "creator": { "name": "integration-tests", "version": "1.0" },
            "entries": entries
        }
    })
    .to_string()
}
