//! HAR trace analyzer
//!
//! Parses HTTP Archive (HAR) traces into an immutable transaction log and
//! answers queries over it: which transactions pass the current filter and
//! search term, in what order, and what each one looks like in detail.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Captured transactions, timing breakdowns and the derived
//!   content category and status class
//! - **parser**: Decodes a HAR document into a `TransactionLog`, rejecting
//!   structurally broken input at the boundary
//! - **query**: The filter engine, search predicate, sort engine and the
//!   `QuerySession` that keeps a memoized view in sync with them
//! - **formatter**: Size/duration formatting, body pretty-printing and
//!   plain-text detail rendering
//! - **config**: User settings (default filter, default sort, rendering)
//!
//! # Query Pipeline
//!
//! A view is always computed from the log in the same way:
//! 1. Keep transactions whose method, status class and content category are
//!    all included and which match the search term (log order preserved)
//! 2. Apply the active sort key, if any, with a stable sort
//!
//! The log is never mutated; a view is only a list of positions into it.
//!
//! # Usage
//!
//! ```
//! use har_analyzer::config::AnalyzerConfig;
//! use har_analyzer::query::{QuerySession, SortKey};
//!
//! let har = r#"{"log": {"entries": [
//!     {"startedDateTime": "2024-01-01T00:00:00Z",
//!      "request": {"method": "GET", "url": "https://example.com/a"},
//!      "response": {"status": 200, "content": {"size": 10}},
//!      "timings": {"wait": 5}},
//!     {"startedDateTime": "2024-01-01T00:00:01Z",
//!      "request": {"method": "GET", "url": "https://example.com/b"},
//!      "response": {"status": 404, "content": {"size": 20}},
//!      "timings": {"wait": 50}}
//! ]}}"#;
//!
//! let mut session = QuerySession::new(&AnalyzerConfig::default());
//! session.load_str(har).unwrap();
//! session.set_sort(SortKey::Duration);
//!
//! let urls: Vec<&str> = session.transactions().map(|t| t.url()).collect();
//! assert_eq!(urls, vec!["https://example.com/b", "https://example.com/a"]);
//! ```

pub mod config;
pub mod formatter;
pub mod models;
pub mod parser;
pub mod query;

pub use config::{load_config, AnalyzerConfig, ConfigError};
pub use models::{Transaction, TransactionLog};
pub use parser::{parse_har, ParseError};
pub use query::{FilterConfig, QuerySession, QueryView, SortKey};
