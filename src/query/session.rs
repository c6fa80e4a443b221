//! Query session: the stateful owner of a loaded trace.
//!
//! A session holds the transaction log, the current filter and sort key, the
//! memoized view they produce and the selected view index. Every operation
//! that changes the view installs a new one and resets the selection, since
//! view indices are not stable across rebuilds.
//!
//! A freshly loaded trace is shown in full. The filter only starts hiding
//! transactions once it is first changed (or when the configured defaults
//! already exclude something), so methods outside the default set and
//! status codes without a class stay visible until the user narrows the
//! view.

use super::filter::{apply_filter, FilterConfig};
use super::sort::{sort_view, SortKey};
use super::QueryView;
use crate::config::AnalyzerConfig;
use crate::models::{Transaction, TransactionLog};
use crate::parser::{parse_har, ParseError};
use log::{debug, info};

/// Interactive query state over one trace.
///
/// # Example
///
/// ```
/// use har_analyzer::query::{QuerySession, SortKey};
///
/// let har = r#"{"log": {"entries": [
///   {"request": {"method": "GET", "url": "https://a.test/"},
///    "response": {"status": 200, "content": {"size": 10}}},
///   {"request": {"method": "GET", "url": "https://b.test/"},
///    "response": {"status": 200, "content": {"size": 99}}}
/// ]}}"#;
///
/// let mut session = QuerySession::default();
/// session.load_str(har).unwrap();
/// session.set_sort(SortKey::Size);
///
/// let urls: Vec<&str> = session.transactions().map(|t| t.url()).collect();
/// assert_eq!(urls, vec!["https://b.test/", "https://a.test/"]);
/// ```
#[derive(Debug, Clone)]
pub struct QuerySession {
    default_filter: FilterConfig,
    default_sort: Option<SortKey>,
    log: Option<TransactionLog>,
    filter: FilterConfig,
    sort_key: Option<SortKey>,
    view: QueryView,
    selected: Option<usize>,
    generation: u64,
    filtered: bool,
}

impl QuerySession {
    /// Creates an empty session whose defaults come from the configuration.
    pub fn new(config: &AnalyzerConfig) -> Self {
        let default_filter = FilterConfig::from_config(config);
        Self {
            filter: default_filter.clone(),
            default_filter,
            default_sort: config.default_sort,
            log: None,
            sort_key: config.default_sort,
            view: QueryView::default(),
            selected: None,
            generation: 0,
            filtered: false,
        }
    }

    /// Installs a log and resets filter, search, sort and selection to defaults.
    ///
    /// With the stock defaults every transaction of the log is shown, in log
    /// order (or the configured default sort).
    pub fn load(&mut self, log: TransactionLog) {
        info!("Loading trace with {} transactions", log.len());
        self.log = Some(log);
        self.reset_to_defaults();
        self.recompute();
    }

    /// Parses a HAR document and loads it.
    ///
    /// On failure the session is left exactly as it was.
    pub fn load_str(&mut self, content: &str) -> Result<(), ParseError> {
        let log = parse_har(content)?;
        self.load(log);
        Ok(())
    }

    /// Returns to the no-log state.
    pub fn clear(&mut self) {
        self.log = None;
        self.reset_to_defaults();
        self.recompute();
    }

    fn reset_to_defaults(&mut self) {
        self.filter = self.default_filter.clone();
        self.sort_key = self.default_sort;
        self.filtered = self.default_filter != FilterConfig::all();
    }

    /// Replaces the whole filter, search term included, and rebuilds the view.
    pub fn set_filter(&mut self, filter: FilterConfig) {
        self.filter = filter;
        self.filtered = true;
        self.recompute();
    }

    /// Edits the current filter in place and rebuilds the view.
    ///
    /// # Example
    ///
    /// ```
    /// use har_analyzer::models::StatusClass;
    /// use har_analyzer::query::QuerySession;
    ///
    /// let mut session = QuerySession::default();
    /// session.update_filter(|filter| {
    ///     filter.toggle_status_class(StatusClass::Redirect);
    /// });
    /// assert!(!session.filter().status_classes.contains(&StatusClass::Redirect));
    /// ```
    pub fn update_filter<F>(&mut self, updater: F)
    where
        F: FnOnce(&mut FilterConfig),
    {
        updater(&mut self.filter);
        self.filtered = true;
        self.recompute();
    }

    /// Sets the search term and rebuilds the view.
    pub fn set_search(&mut self, term: &str) {
        self.filter.set_search(term);
        self.filtered = true;
        self.recompute();
    }

    /// Sorts the current view by a key.
    ///
    /// The filter is not re-evaluated: the current view is reordered, and
    /// ties keep the order they had in it. The key is remembered so that
    /// later filter changes come out sorted the same way.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = Some(key);
        let view = match &self.log {
            Some(log) => sort_view(log, &self.view, key),
            None => QueryView::default(),
        };
        self.install(view);
    }

    /// Sorts by a key given by name.
    ///
    /// Returns `false` and leaves everything untouched when the name is not
    /// a known sort key.
    pub fn set_sort_by_name(&mut self, name: &str) -> bool {
        match SortKey::parse(name) {
            Some(key) => {
                self.set_sort(key);
                true
            }
            None => {
                debug!("Ignoring unknown sort key '{}'", name);
                false
            }
        }
    }

    /// Reserves a generation number for a view computed outside the session.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Installs a view computed elsewhere (e.g. by a debounced worker).
    ///
    /// The view must carry a generation obtained from [`next_generation`].
    /// A view older than the current one is discarded and `false` returned,
    /// so a slow computation cannot overwrite a newer result. A view with a
    /// position outside the loaded log is rejected the same way.
    ///
    /// [`next_generation`]: QuerySession::next_generation
    pub fn install_view(&mut self, view: QueryView) -> bool {
        if view.generation() <= self.view.generation() {
            debug!(
                "Discarding stale view (generation {} <= {})",
                view.generation(),
                self.view.generation()
            );
            return false;
        }
        let total = self.total_count();
        if let Some(position) = view.positions().iter().find(|p| **p >= total) {
            debug!(
                "Discarding view with position {} outside a log of {} transactions",
                position, total
            );
            return false;
        }
        self.view = view;
        self.selected = None;
        true
    }

    fn recompute(&mut self) {
        let view = match &self.log {
            Some(log) => {
                let base = if self.filtered {
                    apply_filter(log, &self.filter)
                } else {
                    QueryView::identity(log)
                };
                match self.sort_key {
                    Some(key) => sort_view(log, &base, key),
                    None => base,
                }
            }
            None => QueryView::default(),
        };
        self.install(view);
    }

    fn install(&mut self, view: QueryView) {
        let generation = self.next_generation();
        let view = view.with_generation(generation);
        debug!(
            "View generation {}: {} of {} transactions",
            generation,
            view.len(),
            self.total_count()
        );
        self.install_view(view);
    }

    /// Whether a log is loaded.
    pub fn is_loaded(&self) -> bool {
        self.log.is_some()
    }

    /// The loaded log, if any.
    pub fn log(&self) -> Option<&TransactionLog> {
        self.log.as_ref()
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Whether the filter is applied to the view.
    ///
    /// `false` right after a load with stock defaults, when the whole log is
    /// shown.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Active sort key, if any.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Current view.
    pub fn view(&self) -> &QueryView {
        &self.view
    }

    /// Number of transactions in the current view.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Whether the current view is empty.
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Number of transactions in the loaded log.
    pub fn total_count(&self) -> usize {
        self.log.as_ref().map_or(0, TransactionLog::len)
    }

    /// Transaction at a view index.
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.log.as_ref().and_then(|log| self.view.get(index, log))
    }

    /// Iterates over the current view's transactions in view order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.log
            .iter()
            .flat_map(move |log| self.view.transactions(log))
    }

    /// Selects the transaction at a view index.
    ///
    /// Out-of-range indices leave the selection unchanged and return `None`.
    pub fn select(&mut self, index: usize) -> Option<&Transaction> {
        if index >= self.view.len() {
            return None;
        }
        self.selected = Some(index);
        self.get(index)
    }

    /// Moves the selection down one row.
    ///
    /// With nothing selected the first row is selected; on the last row the
    /// selection stays put.
    pub fn select_next(&mut self) -> Option<usize> {
        let len = self.view.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(0),
            Some(index) if index + 1 < len => Some(index + 1),
            Some(index) => Some(index),
        };
        self.selected
    }

    /// Moves the selection up one row.
    ///
    /// With nothing selected the last row is selected; on the first row the
    /// selection stays put.
    pub fn select_previous(&mut self) -> Option<usize> {
        let len = self.view.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(len - 1),
            Some(index) => Some(index.saturating_sub(1)),
        };
        self.selected
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selected view index, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected transaction, if any.
    pub fn selected(&self) -> Option<&Transaction> {
        self.selected.and_then(|index| self.get(index))
    }
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
