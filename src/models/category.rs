//! Coarse classification of captured transactions.
//!
//! This module defines the content category derived from a response's
//! `Content-Type` header and the status class derived from its status code.
//! Both are used as inclusion dimensions by the filter engine.

use super::transaction::NameValuePair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content category of a response payload.
///
/// Derived from the `Content-Type` response header. Anything that is not
/// recognized falls into [`ContentCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    /// HTML documents (text/html)
    Html,
    /// Stylesheets (text/css)
    Css,
    /// Scripts (any `javascript` MIME type, or text/js)
    Js,
    /// JSON data (application/json)
    Json,
    /// Images (image/*)
    Image,
    /// Everything else, including responses without a Content-Type header
    Other,
}

impl ContentCategory {
    /// All categories in display order.
    pub const ALL: [ContentCategory; 6] = [
        ContentCategory::Html,
        ContentCategory::Css,
        ContentCategory::Js,
        ContentCategory::Json,
        ContentCategory::Image,
        ContentCategory::Other,
    ];

    /// Returns the lowercase label of the category (e.g. `"json"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Html => "html",
            ContentCategory::Css => "css",
            ContentCategory::Js => "js",
            ContentCategory::Json => "json",
            ContentCategory::Image => "image",
            ContentCategory::Other => "other",
        }
    }

    /// Parses a category label, case-insensitively.
    ///
    /// # Returns
    ///
    /// `Some(ContentCategory)` for a known label, `None` otherwise.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "html" => Some(ContentCategory::Html),
            "css" => Some(ContentCategory::Css),
            "js" => Some(ContentCategory::Js),
            "json" => Some(ContentCategory::Json),
            "image" => Some(ContentCategory::Image),
            "other" => Some(ContentCategory::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the content category from a list of response headers.
///
/// Looks up the `Content-Type` header by case-insensitive name, lowercases
/// its value and tests substrings in priority order. The first match wins:
///
/// 1. `text/html` → html
/// 2. `text/css` → css
/// 3. `javascript` or `text/js` → js
/// 4. `application/json` → json
/// 5. `image/` → image
///
/// A missing header or an unrecognized value yields `other`.
///
/// # Examples
///
/// ```
/// use har_analyzer::models::{derive_content_category, ContentCategory, NameValuePair};
///
/// let headers = vec![NameValuePair::new("Content-Type", "application/json; charset=utf-8")];
/// assert_eq!(derive_content_category(&headers), ContentCategory::Json);
/// assert_eq!(derive_content_category(&[]), ContentCategory::Other);
/// ```
pub fn derive_content_category(headers: &[NameValuePair]) -> ContentCategory {
    let content_type = match headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-type"))
    {
        Some(header) => header.value.to_lowercase(),
        None => return ContentCategory::Other,
    };

    if content_type.contains("text/html") {
        ContentCategory::Html
    } else if content_type.contains("text/css") {
        ContentCategory::Css
    } else if content_type.contains("javascript") || content_type.contains("text/js") {
        ContentCategory::Js
    } else if content_type.contains("application/json") {
        ContentCategory::Json
    } else if content_type.contains("image/") {
        ContentCategory::Image
    } else {
        ContentCategory::Other
    }
}

/// Hundreds-digit grouping of an HTTP status code.
///
/// Only the four classes a trace filter can select are representable;
/// informational (1xx) codes and the `0` used by browsers for aborted
/// requests have no class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusClass {
    /// 200-299
    #[serde(rename = "2xx")]
    Success,
    /// 300-399
    #[serde(rename = "3xx")]
    Redirect,
    /// 400-499
    #[serde(rename = "4xx")]
    ClientError,
    /// 500-599
    #[serde(rename = "5xx")]
    ServerError,
}

impl StatusClass {
    /// All status classes in ascending order.
    pub const ALL: [StatusClass; 4] = [
        StatusClass::Success,
        StatusClass::Redirect,
        StatusClass::ClientError,
        StatusClass::ServerError,
    ];

    /// Returns the class of a status code, if it has one.
    pub fn of(status: u16) -> Option<Self> {
        match status / 100 {
            2 => Some(StatusClass::Success),
            3 => Some(StatusClass::Redirect),
            4 => Some(StatusClass::ClientError),
            5 => Some(StatusClass::ServerError),
            _ => None,
        }
    }

    /// Returns the label of the class (e.g. `"4xx"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::Redirect => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
        }
    }

    /// Parses a class label such as `"2xx"` (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "2xx" => Some(StatusClass::Success),
            "3xx" => Some(StatusClass::Redirect),
            "4xx" => Some(StatusClass::ClientError),
            "5xx" => Some(StatusClass::ServerError),
            _ => None,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
