//! Search state published to observers

use rickdex_core::{apply_filters, derive_facets, Character, Facets, FilterSelection};

/// Snapshot of everything a search view renders
///
/// Only [`crate::SearchController`] writes it. Observers get clones through
/// the controller's watch channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Raw text as typed
    query_text: String,

    /// Last successful unfiltered result set
    all_results: Vec<Character>,

    /// `all_results` with `selection` applied
    visible_results: Vec<Character>,

    /// Facet values present in `all_results`
    facets: Facets,

    selection: FilterSelection,

    loading: bool,

    /// Message describing the last failed request
    error: Option<String>,

    /// Query whose results are currently held
    settled_query: Option<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn all_results(&self) -> &[Character] {
        &self.all_results
    }

    pub fn visible_results(&self) -> &[Character] {
        &self.visible_results
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Query that produced the results currently held, if any
    pub fn settled_query(&self) -> Option<&str> {
        self.settled_query.as_deref()
    }

    pub fn has_active_filters(&self) -> bool {
        self.selection.is_active()
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Searching
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.settled_query.is_some() {
            SearchPhase::Results
        } else {
            SearchPhase::Idle
        }
    }

    /// A search finished but nothing is left to show
    pub fn shows_empty_state(&self) -> bool {
        self.phase() == SearchPhase::Results && self.visible_results.is_empty()
    }

    pub(crate) fn set_query_text(&mut self, text: String) {
        self.query_text = text;
    }

    pub(crate) fn selection_mut(&mut self) -> &mut FilterSelection {
        &mut self.selection
    }

    pub(crate) fn begin_search(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Drop results, facets and status flags; the selection survives
    pub(crate) fn reset_results(&mut self) {
        self.all_results.clear();
        self.visible_results.clear();
        self.facets = Facets::default();
        self.loading = false;
        self.error = None;
        self.settled_query = None;
    }

    pub(crate) fn accept_results(&mut self, query: String, characters: Vec<Character>) {
        self.facets = derive_facets(&characters);
        self.all_results = characters;
        self.refilter();
        self.loading = false;
        self.error = None;
        self.settled_query = Some(query);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.reset_results();
        self.error = Some(message);
    }

    pub(crate) fn refilter(&mut self) {
        self.visible_results = apply_filters(&self.all_results, &self.selection);
    }
}

/// Where the controller is in its request lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing searched yet, or the query is empty
    #[default]
    Idle,
    /// A request is in flight
    Searching,
    /// The last request failed; see [`SearchState::error`]
    Failed,
    /// The last request succeeded, possibly with no matches
    Results,
}

impl SearchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Searching => "searching",
            SearchPhase::Failed => "failed",
            SearchPhase::Results => "results",
        }
    }
}
