//! Wire schema of a HAR document.
//!
//! These types mirror the JSON shapes accepted at the ingestion boundary.
//! Only the fields an entry cannot do without are typed strictly (`request`,
//! `response`, `method`, `url`, `status`). Everything else is kept as a raw
//! JSON value so that a field of the wrong type can be recovered during
//! conversion instead of failing the whole load.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct RawCreator {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntry {
    #[serde(default)]
    pub started_date_time: Option<Value>,
    pub request: RawRequest,
    pub response: RawResponse,
    #[serde(default)]
    pub timings: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRequest {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub http_version: Option<Value>,
    #[serde(default)]
    pub headers: Option<Value>,
    #[serde(default)]
    pub query_string: Option<Value>,
    #[serde(default)]
    pub cookies: Option<Value>,
    #[serde(default)]
    pub post_data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPostData {
    #[serde(default)]
    pub mime_type: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawResponse {
    pub status: Value,
    #[serde(default)]
    pub status_text: Option<Value>,
    #[serde(default)]
    pub headers: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub body_size: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContent {
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub mime_type: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub encoding: Option<Value>,
}

/// Name/value pair; names and values that are not strings are stringified.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPair {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}
