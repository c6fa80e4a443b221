//! Filter engine.
//!
//! A transaction passes the filter when its method, status class and content
//! category are all in the configured inclusion sets and, if a search term is
//! set, the search predicate matches. An empty inclusion set lets nothing
//! through: clearing every checkbox of a dimension yields an empty view.

use super::search::matches;
use super::QueryView;
use crate::config::AnalyzerConfig;
use crate::models::{ContentCategory, StatusClass, Transaction, TransactionLog};
use std::collections::BTreeSet;

/// Methods included by default.
pub const DEFAULT_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];

/// Filter configuration: three inclusion sets and a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Included HTTP methods, matched exactly (case-sensitive).
    pub methods: BTreeSet<String>,

    /// Included status classes. Status codes without a class never pass.
    pub status_classes: BTreeSet<StatusClass>,

    /// Included content categories.
    pub content_categories: BTreeSet<ContentCategory>,

    /// Lowercased search term; empty means no search.
    search: String,
}

impl FilterConfig {
    /// Filter that includes the default methods, every status class and
    /// every content category, with no search term.
    pub fn all() -> Self {
        Self {
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            status_classes: StatusClass::ALL.into_iter().collect(),
            content_categories: ContentCategory::ALL.into_iter().collect(),
            search: String::new(),
        }
    }

    /// Filter with every inclusion set empty. Nothing passes it.
    pub fn none() -> Self {
        Self {
            methods: BTreeSet::new(),
            status_classes: BTreeSet::new(),
            content_categories: BTreeSet::new(),
            search: String::new(),
        }
    }

    /// Filter built from the configured default inclusion sets.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            methods: config.methods.iter().cloned().collect(),
            status_classes: config.status_classes.iter().copied().collect(),
            content_categories: config.content_categories.iter().copied().collect(),
            search: String::new(),
        }
    }

    /// Current (lowercased) search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the search term. It is stored lowercased; whitespace is kept.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    /// Flips inclusion of a method and returns whether it is now included.
    pub fn toggle_method(&mut self, method: &str) -> bool {
        if self.methods.remove(method) {
            false
        } else {
            self.methods.insert(method.to_string());
            true
        }
    }

    /// Flips inclusion of a status class and returns whether it is now included.
    pub fn toggle_status_class(&mut self, class: StatusClass) -> bool {
        toggle(&mut self.status_classes, class)
    }

    /// Flips inclusion of a content category and returns whether it is now included.
    pub fn toggle_content_category(&mut self, category: ContentCategory) -> bool {
        toggle(&mut self.content_categories, category)
    }

    /// Checks a single transaction against the filter.
    ///
    /// Legs are evaluated cheapest first: method, status class, content
    /// category, then the full-text search.
    pub fn passes(&self, transaction: &Transaction) -> bool {
        if !self.methods.contains(transaction.method()) {
            return false;
        }

        match transaction.status_class() {
            Some(class) if self.status_classes.contains(&class) => {}
            _ => return false,
        }

        if !self
            .content_categories
            .contains(&transaction.content_category())
        {
            return false;
        }

        self.search.is_empty() || matches(transaction, &self.search)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::all()
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

/// Applies a filter to a log.
///
/// Single pass over the log; the result keeps log order and the log is left
/// untouched.
///
/// # Arguments
///
/// * `log` - The transactions to filter
/// * `config` - The filter to apply
///
/// # Returns
///
/// A fresh `QueryView` holding the positions of the passing transactions.
pub fn apply_filter(log: &TransactionLog, config: &FilterConfig) -> QueryView {
    let positions = log
        .iter()
        .enumerate()
        .filter(|(_, transaction)| config.passes(transaction))
        .map(|(position, _)| position)
        .collect();

    QueryView::from_positions(positions)
}
