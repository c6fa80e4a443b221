//! Free-text search over captured transactions.
//!
//! The predicate checks several groups of fields in a fixed order and stops
//! at the first hit. Each group is joined into one space-separated string
//! before the substring test, so a term can match across the boundary of two
//! adjacent pairs (e.g. `"foo b"` against headers `a: foo` and `b: bar`).
//! Matching across that boundary is intentional.

use super::QueryView;
use crate::models::{NameValuePair, Transaction, TransactionLog};

/// Checks whether a transaction matches a lowercase search term.
///
/// Field groups, in evaluation order:
///
/// 1. URL, method, status code and status text
/// 2. Request headers as `name: value`
/// 3. Response headers as `name: value`
/// 4. Query parameters as `name=value`
/// 5. Request body text
/// 6. Response body text
/// 7. Request cookies as `name=value`
///
/// # Arguments
///
/// * `transaction` - The transaction to test
/// * `term` - The search term, already lowercased
///
/// # Returns
///
/// `true` if any group contains the term. An empty term always matches.
pub fn matches(transaction: &Transaction, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let request = &transaction.request;
    let response = &transaction.response;

    let status = response.status.to_string();
    let basic_info = [
        request.url.as_str(),
        request.method.as_str(),
        status.as_str(),
        response.status_text.as_str(),
    ]
    .join(" ");
    if contains(&basic_info, term) {
        return true;
    }

    if contains(&join_pairs(&request.headers, ": "), term) {
        return true;
    }

    if contains(&join_pairs(&response.headers, ": "), term) {
        return true;
    }

    if !request.query_string.is_empty() && contains(&join_pairs(&request.query_string, "="), term)
    {
        return true;
    }

    if let Some(text) = request.post_data.as_ref().and_then(|p| p.text.as_deref()) {
        if contains(text, term) {
            return true;
        }
    }

    if let Some(text) = response.content.text.as_deref() {
        if contains(text, term) {
            return true;
        }
    }

    !request.cookies.is_empty() && contains(&join_pairs(&request.cookies, "="), term)
}

/// Searches a log, returning the matching transactions in log order.
///
/// Unlike [`matches`], the query does not need to be lowercased.
pub fn search_log(query: &str, log: &TransactionLog) -> QueryView {
    let term = query.to_lowercase();

    QueryView::from_positions(
        log.iter()
            .enumerate()
            .filter(|(_, transaction)| matches(transaction, &term))
            .map(|(position, _)| position)
            .collect(),
    )
}

fn join_pairs(pairs: &[NameValuePair], separator: &str) -> String {
    pairs
        .iter()
        .map(|pair| format!("{}{}{}", pair.name, separator, pair.value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}
