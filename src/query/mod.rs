//! Trace query engine.
//!
//! This module filters, searches and sorts a [`TransactionLog`]. The
//! building blocks are pure functions of `(log, configuration)`:
//!
//! - **filter**: inclusion sets for method, status class and content category
//! - **search**: case-insensitive substring predicate over many fields
//! - **sort**: stable ordering by one of five keys
//!
//! [`QuerySession`] ties them together and keeps the memoized view that the
//! presentation layer reads.
//!
//! # Example
//!
//! ```
//! use har_analyzer::models::{Request, Response, Transaction, TransactionLog};
//! use har_analyzer::query::{apply_filter, FilterConfig};
//!
//! let log = TransactionLog::new(vec![
//!     Transaction::new(Request::new("GET", "https://example.com/"), Response::new(200, "OK")),
//!     Transaction::new(Request::new("POST", "https://example.com/"), Response::new(500, "Error")),
//! ]);
//!
//! let mut filter = FilterConfig::all();
//! filter.set_search("post");
//!
//! let view = apply_filter(&log, &filter);
//! assert_eq!(view.positions(), &[1]);
//! ```

pub mod filter;
pub mod search;
pub mod session;
pub mod sort;

pub use filter::{apply_filter, FilterConfig, DEFAULT_METHODS};
pub use search::{matches, search_log};
pub use session::QuerySession;
pub use sort::{locale_compare, sort_view, sort_view_by_name, SortKey};

use crate::models::{Transaction, TransactionLog};

/// An ordered selection of transactions from a log.
///
/// The view stores log positions rather than transactions, so it is cheap to
/// rebuild and never aliases the log. Views are replaced wholesale; nothing
/// edits one in place. The generation number lets readers tell two views
/// apart and lets a session refuse to install an older view over a newer one.
/// Every position must be a valid index into the log the view was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryView {
    positions: Vec<usize>,
    generation: u64,
}

impl QueryView {
    /// Creates a view over the given log positions, in order.
    pub fn from_positions(positions: Vec<usize>) -> Self {
        Self {
            positions,
            generation: 0,
        }
    }

    /// Creates a view that lists every transaction of the log in capture order.
    pub fn identity(log: &TransactionLog) -> Self {
        Self::from_positions((0..log.len()).collect())
    }

    /// Returns the same view stamped with a generation number.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Generation number of the view (0 for views built outside a session).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Log positions in view order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of transactions in the view.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Transaction at a view index.
    pub fn get<'a>(&self, index: usize, log: &'a TransactionLog) -> Option<&'a Transaction> {
        self.positions
            .get(index)
            .and_then(|position| log.get(*position))
    }

    /// Iterates over the transactions of the view in view order.
    pub fn transactions<'a>(
        &'a self,
        log: &'a TransactionLog,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.positions
            .iter()
            .filter_map(move |position| log.get(*position))
    }
}
