//! Sort engine.
//!
//! Orders a view by one of five keys. Every sort is stable: transactions
//! with equal keys keep their relative order from the input view, which
//! matters for `size` and `duration` where ties are common.

use super::QueryView;
use crate::models::{Transaction, TransactionLog};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Key a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by start timestamp.
    Time,
    /// Ascending by URL, using locale-aware comparison.
    Url,
    /// Ascending by numeric status code.
    Status,
    /// Descending by effective response size.
    Size,
    /// Descending by total duration.
    Duration,
}

impl SortKey {
    /// All sort keys in menu order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Time,
        SortKey::Url,
        SortKey::Status,
        SortKey::Size,
        SortKey::Duration,
    ];

    /// Returns the name of the key (e.g. `"duration"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Time => "time",
            SortKey::Url => "url",
            SortKey::Status => "status",
            SortKey::Size => "size",
            SortKey::Duration => "duration",
        }
    }

    /// Parses a key name (case-insensitive).
    ///
    /// # Returns
    ///
    /// `Some(SortKey)` for a known name, `None` otherwise.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "time" => Some(SortKey::Time),
            "url" => Some(SortKey::Url),
            "status" => Some(SortKey::Status),
            "size" => Some(SortKey::Size),
            "duration" => Some(SortKey::Duration),
            _ => None,
        }
    }

    /// Compares two transactions under this key.
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            // Unparseable timestamps go after every parseable one
            SortKey::Time => match (&a.started_at, &b.started_at) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Url => locale_compare(a.url(), b.url()),
            SortKey::Status => a.status().cmp(&b.status()),
            SortKey::Size => b.effective_size().cmp(&a.effective_size()),
            SortKey::Duration => b.total_duration().total_cmp(&a.total_duration()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sorts a view by a key.
///
/// # Arguments
///
/// * `log` - The log the view's positions refer to
/// * `view` - The view to reorder
/// * `key` - The sort key
///
/// # Returns
///
/// A new `QueryView` with the same positions in sorted order. Equal keys
/// keep the order they had in `view`.
pub fn sort_view(log: &TransactionLog, view: &QueryView, key: SortKey) -> QueryView {
    let mut positions = view.positions().to_vec();
    positions.sort_by(|a, b| match (log.get(*a), log.get(*b)) {
        (Some(a), Some(b)) => key.compare(a, b),
        _ => Ordering::Equal,
    });

    QueryView::from_positions(positions)
}

/// Sorts a view by a key given by name.
///
/// An unknown name is not an error: the view is returned in its input order.
pub fn sort_view_by_name(log: &TransactionLog, view: &QueryView, name: &str) -> QueryView {
    match SortKey::parse(name) {
        Some(key) => sort_view(log, view, key),
        None => {
            debug!("Unknown sort key '{}', keeping current order", name);
            QueryView::from_positions(view.positions().to_vec())
        }
    }
}

/// Punctuation in collation order; sorts before symbols, digits and letters.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%";

/// Symbols in collation order; sorts after punctuation, before digits.
const SYMBOLS: &str = "`^+<=>|~$";

/// Compares two strings the way a user-facing list expects.
///
/// Approximates the root locale collation: whitespace sorts before
/// punctuation, then symbols, digits and letters; letters compare without
/// regard to case first, and only then lowercase sorts before uppercase.
/// Byte order breaks any remaining tie so the ordering is total.
///
/// # Examples
///
/// ```
/// use har_analyzer::query::locale_compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_compare("a", "A"), Ordering::Less);
/// assert_eq!(locale_compare("https://a.test/", "https://a.test/x"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, c as u32)
    } else if let Some(rank) = PUNCTUATION.find(c) {
        (1, rank as u32)
    } else if let Some(rank) = SYMBOLS.find(c) {
        (2, rank as u32)
    } else if let Some(digit) = c.to_digit(10) {
        (3, digit)
    } else if c.is_alphabetic() {
        (4, c.to_lowercase().next().unwrap_or(c) as u32)
    } else {
        (5, c as u32)
    }
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
