//! Property tests for the query engine
//!
//! Random logs are built directly from the model types so the properties
//! exercise filter, search and sort without going through JSON.

use har_analyzer::models::{
    ContentCategory, NameValuePair, Request, Response, StatusClass, Transaction, TransactionLog,
};
use har_analyzer::query::{apply_filter, matches, sort_view, FilterConfig, QueryView, SortKey};
use proptest::prelude::*;
use std::collections::BTreeSet;

const METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "get"];
const CONTENT_TYPES: [&str; 7] = [
    "text/html",
    "text/css",
    "application/javascript",
    "application/json",
    "image/png",
    "font/woff2",
    "",
];

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        0..METHODS.len(),
        prop_oneof![Just(0u16), 100u16..700],
        0..CONTENT_TYPES.len(),
        prop_oneof![Just(0i64), -1i64..100_000],
        prop::option::of(-1.0f64..500.0),
        "[a-z]{1,8}",
    )
        .prop_map(|(method, status, content_type, size, wait, path)| {
            let request = Request::new(METHODS[method], format!("https://example.com/{}", path));

            let mut response = Response::new(status, "");
            if !CONTENT_TYPES[content_type].is_empty() {
                response
                    .headers
                    .push(NameValuePair::new("Content-Type", CONTENT_TYPES[content_type]));
            }
            response.content.size = Some(size);

            let mut transaction = Transaction::new(request, response);
            transaction.timings.wait = wait;
            transaction
        })
}

fn log_strategy() -> impl Strategy<Value = TransactionLog> {
    prop::collection::vec(transaction_strategy(), 0..40).prop_map(TransactionLog::new)
}

fn filter_strategy() -> impl Strategy<Value = FilterConfig> {
    (
        prop::sample::subsequence(METHODS.to_vec(), 0..=METHODS.len()),
        prop::sample::subsequence(StatusClass::ALL.to_vec(), 0..=4),
        prop::sample::subsequence(ContentCategory::ALL.to_vec(), 0..=6),
        prop_oneof![Just(String::new()), "[a-z]{1,3}"],
    )
        .prop_map(|(methods, classes, categories, search)| {
            let mut filter = FilterConfig::none();
            filter.methods = methods.into_iter().map(str::to_string).collect();
            filter.status_classes = classes.into_iter().collect();
            filter.content_categories = categories.into_iter().collect();
            filter.set_search(&search);
            filter
        })
}

proptest! {
    #[test]
    fn filter_is_order_preserving_subsequence(log in log_strategy(), filter in filter_strategy()) {
        let view = apply_filter(&log, &filter);

        prop_assert!(view.positions().windows(2).all(|pair| pair[0] < pair[1]));

        let kept: BTreeSet<usize> = view.positions().iter().copied().collect();
        for (position, transaction) in log.iter().enumerate() {
            prop_assert_eq!(kept.contains(&position), filter.passes(transaction));
        }
    }

    #[test]
    fn empty_inclusion_set_yields_empty_view(log in log_strategy(), dimension in 0..3usize) {
        let mut filter = FilterConfig::all();
        match dimension {
            0 => filter.methods.clear(),
            1 => filter.status_classes.clear(),
            _ => filter.content_categories.clear(),
        }

        prop_assert!(apply_filter(&log, &filter).is_empty());
    }

    #[test]
    fn empty_term_matches_everything(transaction in transaction_strategy()) {
        prop_assert!(matches(&transaction, ""));
    }

    #[test]
    fn size_sort_is_idempotent_and_stable(log in log_strategy()) {
        let once = sort_view(&log, &QueryView::identity(&log), SortKey::Size);
        let twice = sort_view(&log, &once, SortKey::Size);
        prop_assert_eq!(&once, &twice);

        for pair in once.positions().windows(2) {
            let (a, b) = (&log.entries[pair[0]], &log.entries[pair[1]]);
            prop_assert!(a.effective_size() >= b.effective_size());
            if a.effective_size() == b.effective_size() {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn duration_sort_is_permutation(log in log_strategy()) {
        let view = sort_view(&log, &QueryView::identity(&log), SortKey::Duration);
        let mut positions = view.positions().to_vec();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..log.len()).collect::<Vec<_>>());
    }
}
