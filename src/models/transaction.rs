//! Captured request/response data models.
//!
//! This module defines the normalized representation of one captured HTTP
//! transaction and of the log that holds them. Values are produced by the
//! parser and never mutated afterwards.

use super::category::{derive_content_category, ContentCategory, StatusClass};
use super::timings::Timings;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A name/value pair as it appears in the trace.
///
/// Used for headers, query parameters, cookies and form parameters. Order
/// and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    /// Pair name (header name, parameter name, cookie name).
    pub name: String,
    /// Pair value.
    pub value: String,
}

impl NameValuePair {
    /// Creates a new pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Posted request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    /// Declared MIME type of the posted data.
    pub mime_type: Option<String>,

    /// Raw posted text, if the trace captured it.
    pub text: Option<String>,

    /// Parsed form parameters (for url-encoded or multipart bodies).
    pub params: Vec<NameValuePair>,
}

/// The request half of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method exactly as captured (e.g. "GET").
    pub method: String,

    /// Absolute request URL.
    pub url: String,

    /// Protocol version (e.g. "HTTP/1.1", "h2"), if captured.
    pub http_version: Option<String>,

    /// Request headers in capture order.
    pub headers: Vec<NameValuePair>,

    /// Decoded query string parameters.
    pub query_string: Vec<NameValuePair>,

    /// Cookies sent with the request.
    pub cookies: Vec<NameValuePair>,

    /// Request body, if any was posted.
    pub post_data: Option<PostData>,
}

impl Request {
    /// Creates a request with no headers, parameters, cookies or body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            http_version: None,
            headers: Vec::new(),
            query_string: Vec::new(),
            cookies: Vec::new(),
            post_data: None,
        }
    }

    /// Appends a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(NameValuePair::new(name, value));
    }

    /// Sets the raw body text.
    pub fn set_body_text(&mut self, text: impl Into<String>) {
        self.post_data
            .get_or_insert_with(PostData::default)
            .text = Some(text.into());
    }
}

/// Captured response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseContent {
    /// Length of the returned content in bytes, as declared by the trace.
    pub size: Option<i64>,

    /// Declared MIME type of the body.
    pub mime_type: Option<String>,

    /// Body text, if the trace captured it.
    pub text: Option<String>,

    /// Transfer encoding of `text` (HAR uses `"base64"` for binary bodies).
    pub encoding: Option<String>,
}

/// The response half of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Numeric status code. `0` is used by browsers for aborted requests.
    pub status: u16,

    /// Status reason phrase.
    pub status_text: String,

    /// Response headers in capture order.
    pub headers: Vec<NameValuePair>,

    /// Response body block.
    pub content: ResponseContent,

    /// Size of the received body on the wire, as declared by the trace.
    pub body_size: Option<i64>,
}

impl Response {
    /// Creates a response with no headers and an empty content block.
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: Vec::new(),
            content: ResponseContent::default(),
            body_size: None,
        }
    }

    /// Appends a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(NameValuePair::new(name, value));
    }

    /// Sets the body text and its declared MIME type.
    pub fn set_body_text(&mut self, text: impl Into<String>, mime_type: impl Into<String>) {
        self.content.text = Some(text.into());
        self.content.mime_type = Some(mime_type.into());
    }

    /// Response size in bytes.
    ///
    /// Uses the declared content size when it is positive, falls back to the
    /// wire body size when that is positive, and to zero otherwise. Negative
    /// sizes (HAR's `-1` for "unknown") never leak through.
    pub fn effective_size(&self) -> u64 {
        [self.content.size, self.body_size]
            .into_iter()
            .flatten()
            .find(|size| *size > 0)
            .map(|size| size as u64)
            .unwrap_or(0)
    }

    /// Content category derived from the `Content-Type` header.
    pub fn content_category(&self) -> ContentCategory {
        derive_content_category(&self.headers)
    }

    /// Status class, if the status code has one.
    pub fn status_class(&self) -> Option<StatusClass> {
        StatusClass::of(self.status)
    }
}

/// One captured request/response pair with its timing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Start timestamp exactly as it appeared in the trace.
    pub started_date_time: String,

    /// Parsed start timestamp, `None` when the trace value is not valid RFC 3339.
    pub started_at: Option<DateTime<FixedOffset>>,

    /// The request that was sent.
    pub request: Request,

    /// The response that was received.
    pub response: Response,

    /// Per-phase timing breakdown.
    pub timings: Timings,
}

impl Transaction {
    /// Creates a transaction from its parts with an empty timestamp and no timings.
    pub fn new(request: Request, response: Response) -> Self {
        Self {
            started_date_time: String::new(),
            started_at: None,
            request,
            response,
            timings: Timings::new(),
        }
    }

    /// Sets the start timestamp, parsing it when possible.
    pub fn set_started(&mut self, started: impl Into<String>) {
        self.started_date_time = started.into();
        self.started_at = DateTime::parse_from_rfc3339(&self.started_date_time).ok();
    }

    /// HTTP method of the request.
    pub fn method(&self) -> &str {
        &self.request.method
    }

    /// Request URL.
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Response status code.
    pub fn status(&self) -> u16 {
        self.response.status
    }

    /// See [`Response::status_class`].
    pub fn status_class(&self) -> Option<StatusClass> {
        self.response.status_class()
    }

    /// See [`Response::content_category`].
    pub fn content_category(&self) -> ContentCategory {
        self.response.content_category()
    }

    /// See [`Response::effective_size`].
    pub fn effective_size(&self) -> u64 {
        self.response.effective_size()
    }

    /// See [`Timings::total_duration`].
    pub fn total_duration(&self) -> f64 {
        self.timings.total_duration()
    }
}

/// Tool that produced the trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Tool name (e.g. "WebInspector").
    pub name: String,
    /// Tool version.
    pub version: String,
}

/// The full parsed trace: an ordered sequence of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionLog {
    /// Format version declared by the trace.
    pub version: Option<String>,

    /// Tool that produced the trace.
    pub creator: Option<Creator>,

    /// Transactions in capture order.
    pub entries: Vec<Transaction>,
}

impl TransactionLog {
    /// Creates a log holding the given transactions.
    pub fn new(entries: Vec<Transaction>) -> Self {
        Self {
            version: None,
            creator: None,
            entries,
        }
    }

    /// Number of transactions in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no transaction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Transaction at a log position.
    pub fn get(&self, position: usize) -> Option<&Transaction> {
        self.entries.get(position)
    }

    /// Iterates over the transactions in capture order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }
}
