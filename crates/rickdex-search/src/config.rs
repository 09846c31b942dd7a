//! Timing configuration for the search controller

use std::time::Duration;

/// Debounce windows used by [`crate::SearchController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    pub query_debounce: Duration,

    /// Quiet period after the last facet change before the view is refiltered
    pub filter_debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query_debounce: Duration::from_millis(500),
            filter_debounce: Duration::from_millis(300),
        }
    }
}

impl SearchConfig {
    pub fn with_query_debounce(mut self, debounce: Duration) -> Self {
        self.query_debounce = debounce;
        self
    }

    pub fn with_filter_debounce(mut self, debounce: Duration) -> Self {
        self.filter_debounce = debounce;
        self
    }
}
