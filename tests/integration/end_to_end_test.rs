//! End-to-end integration tests for the HAR analyzer
//!
//! These tests drive complete workflows from a HAR document through the
//! query session to the rendered output.

use super::{entry, entry_with_type, har_document, init_test_env};
use har_analyzer::config::AnalyzerConfig;
use har_analyzer::formatter::{render_details, summary_line};
use har_analyzer::models::{ContentCategory, StatusClass};
use har_analyzer::parser::{parse_har, ParseError};
use har_analyzer::query::{apply_filter, FilterConfig, QuerySession, SortKey};
use serde_json::json;
use std::collections::BTreeSet;

fn loaded_session(document: &str) -> QuerySession {
    init_test_env();
    let mut session = QuerySession::new(&AnalyzerConfig::default());
    session.load_str(document).expect("Failed to load trace");
    session
}

#[test]
fn test_filter_by_method_and_status_class() {
    let document = har_document(vec![
        entry("GET", "https://api.example.com/a", 200, 5.0),
        entry("POST", "https://api.example.com/b", 404, 5.0),
        entry("GET", "https://api.example.com/c", 500, 5.0),
    ]);
    let log = parse_har(&document).unwrap();

    let mut filter = FilterConfig::all();
    filter.methods = BTreeSet::from(["GET".to_string()]);
    filter.status_classes = BTreeSet::from([StatusClass::Success, StatusClass::ServerError]);

    let view = apply_filter(&log, &filter);
    let statuses: Vec<u16> = view.transactions(&log).map(|t| t.status()).collect();
    assert_eq!(view.positions(), &[0, 2]);
    assert_eq!(statuses, vec![200, 500]);
}

#[test]
fn test_sort_by_duration_with_ties() {
    let document = har_document(vec![
        entry("GET", "https://example.com/1", 200, 10.0),
        entry("GET", "https://example.com/2", 200, 50.0),
        entry("GET", "https://example.com/3", 200, 10.0),
        entry("GET", "https://example.com/4", 200, 30.0),
    ]);

    let mut session = loaded_session(&document);
    session.set_sort(SortKey::Duration);

    let urls: Vec<&str> = session.transactions().map(|t| t.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/2",
            "https://example.com/4",
            "https://example.com/1",
            "https://example.com/3"
        ]
    );
}

#[test]
fn test_session_workflow() {
    let document = har_document(vec![
        entry_with_type(
            "GET",
            "https://cdn.example.com/app.js",
            200,
            "application/javascript",
            3.0,
        ),
        entry("POST", "https://api.example.com/login", 401, 12.0),
        entry_with_type("GET", "https://example.com/", 200, "text/html; charset=utf-8", 8.0),
        entry("OPTIONS", "https://api.example.com/login", 204, 1.0),
    ]);

    let mut session = loaded_session(&document);
    assert_eq!(session.len(), 4);
    assert_eq!(session.total_count(), 4);

    // OPTIONS is not in the default method set
    session.set_search("");
    assert_eq!(session.len(), 3);

    session.update_filter(|filter| {
        filter.toggle_method("OPTIONS");
    });
    assert_eq!(session.len(), 4);

    session.update_filter(|filter| {
        filter.toggle_content_category(ContentCategory::Json);
    });
    let urls: Vec<&str> = session.transactions().map(|t| t.url()).collect();
    assert_eq!(
        urls,
        vec!["https://cdn.example.com/app.js", "https://example.com/"]
    );

    session.set_search("CDN");
    assert_eq!(session.len(), 1);

    session.set_search("");
    session.set_sort(SortKey::Url);
    assert_eq!(session.select_next(), Some(0));
    assert_eq!(
        session.selected().map(|t| t.url()),
        Some("https://cdn.example.com/app.js")
    );

    session.clear();
    assert!(!session.is_loaded());
    assert!(session.is_empty());
    assert_eq!(session.selected_index(), None);
}

#[test]
fn test_render_selected_transaction() {
    let document = json!({
        "log": {
            "entries": [{
                "startedDateTime": "2024-03-01T12:00:00.000Z",
                "request": {
                    "method": "POST",
                    "url": "https://api.example.com/users",
                    "headers": [{ "name": "Content-Type", "value": "application/json" }],
                    "postData": { "mimeType": "application/json", "text": "{\"name\":\"Ada\"}" }
                },
                "response": {
                    "status": 201,
                    "statusText": "Created",
                    "headers": [{ "name": "Content-Type", "value": "application/json" }],
                    "content": { "size": 1536, "mimeType": "application/json", "text": "{\"id\":1}" }
                },
                "timings": { "dns": -1, "connect": 4, "wait": 20.6, "receive": 1 }
            }]
        }
    })
    .to_string();

    let mut session = loaded_session(&document);
    let transaction = session.select(0).expect("Expected one transaction");

    assert_eq!(
        summary_line(transaction),
        "POST 201 https://api.example.com/users | json | 1.50 KB | 26ms"
    );

    let details = render_details(transaction, &AnalyzerConfig::default());
    assert!(details.contains("  Status: 201 Created\n"));
    assert!(details.contains("Request Body:\n{\n  \"name\": \"Ada\"\n}\n"));
    assert!(details.contains("Response Body:\n{\n  \"id\": 1\n}\n"));
    assert!(details.contains("  DNS Lookup: N/A\n"));
    assert!(details.contains("  Total: 26ms\n"));
}

#[test]
fn test_invalid_entry_reports_index() {
    let document = json!({
        "log": {
            "entries": [
                entry("GET", "https://example.com/ok", 200, 1.0),
                { "request": { "method": "GET", "url": "https://example.com/broken" } }
            ]
        }
    })
    .to_string();

    let result = parse_har(&document);
    match result {
        Err(ParseError::InvalidEntry { index, .. }) => assert_eq!(index, 1),
        other => panic!("Expected InvalidEntry, got {:?}", other),
    }
}

#[test]
fn test_failed_load_keeps_loaded_trace() {
    let document = har_document(vec![entry("GET", "https://example.com/", 200, 1.0)]);
    let mut session = loaded_session(&document);

    let result = session.load_str("{\"log\": {}}");
    assert!(matches!(result, Err(ParseError::MissingEntries)));
    assert!(session.is_loaded());
    assert_eq!(session.len(), 1);
}
