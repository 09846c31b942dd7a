//! Search controller - debounced requests, cancellation and filtering
//!
//! All state changes funnel through one watch channel. Timers and network
//! calls run as Tokio tasks, but none of them write state unless the
//! generation it was started with is still current when it resumes:
//! 1. Keystrokes bump the query generation and arm a debounce timer
//! 2. A timer that fires with a stale generation does nothing
//! 3. Each issued request carries a search generation, compared on completion

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rickdex_client::{CatalogClient, Result as CatalogResult};
use rickdex_core::{Character, FacetAxis};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::state::SearchState;

/// Identity of one scheduled action (a timer or a request)
///
/// Bumped whenever the action is superseded; work started under an older
/// generation is discarded when it resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Coordinates query text, request lifecycle and the filtered view
///
/// Must be used from within a Tokio runtime: debounce timers and requests
/// are spawned onto it.
pub struct SearchController {
    shared: Arc<Shared>,
}

struct Shared {
    client: Arc<dyn CatalogClient>,
    config: SearchConfig,
    state: watch::Sender<SearchState>,
    schedule: Mutex<Schedule>,
}

/// Bookkeeping that decides which pending work may still write state
#[derive(Debug, Default)]
struct Schedule {
    /// Request allowed to publish its outcome
    search: Generation,

    /// Armed keystroke debounce timer
    query_timer: Generation,

    /// Armed facet debounce timer
    filter_timer: Generation,

    /// Trimmed query of the last triggered search
    last_triggered: Option<String>,
}

impl SearchController {
    /// Create a controller that searches through `client`
    pub fn new(client: Arc<dyn CatalogClient>, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::new());

        Self {
            shared: Arc::new(Shared {
                client,
                config,
                state,
                schedule: Mutex::new(Schedule::default()),
            }),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.shared.config
    }

    /// Current state
    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Record new query text and (re)arm the search debounce.
    ///
    /// The text is published immediately. The search fires once no further
    /// text has arrived for the query debounce window, unless the trimmed
    /// text equals the last query that was searched.
    pub fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim().to_owned();

        let mut schedule = self.shared.schedule();
        schedule.query_timer = schedule.query_timer.next();
        self.shared.state.send_modify(|s| s.set_query_text(text));

        if schedule.last_triggered.as_deref() == Some(trimmed.as_str()) {
            debug!("Query {:?} unchanged since last search, not rescheduling", trimmed);
            return;
        }

        let timer = schedule.query_timer;
        drop(schedule);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(shared.config.query_debounce).await;

            let mut schedule = shared.schedule();
            if schedule.query_timer != timer {
                return;
            }
            // A direct trigger_search may have searched this text meanwhile
            let current = shared.state.borrow().query_text().trim().to_owned();
            if schedule.last_triggered.as_deref() == Some(current.as_str()) {
                return;
            }
            shared.trigger_search(&mut schedule);
        });
    }

    /// Search for the current query text right away.
    ///
    /// Invalidates any in-flight request first. An empty query clears all
    /// results without touching the network.
    pub fn trigger_search(&self) {
        let mut schedule = self.shared.schedule();
        self.shared.trigger_search(&mut schedule);
    }

    /// Select a value on one facet axis, or `None` to lift that constraint.
    ///
    /// The selection is published immediately; the visible results follow
    /// after the filter debounce, using whatever results and selection are
    /// current when it fires.
    pub fn set_facet_selection(&self, axis: FacetAxis, value: Option<String>) {
        let mut schedule = self.shared.schedule();
        schedule.filter_timer = schedule.filter_timer.next();
        let timer = schedule.filter_timer;
        self.shared
            .state
            .send_modify(|s| s.selection_mut().set(axis, value));
        drop(schedule);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(shared.config.filter_debounce).await;

            let schedule = shared.schedule();
            if schedule.filter_timer != timer {
                return;
            }
            shared.state.send_modify(SearchState::refilter);
            debug!("Refiltered results after facet change");
        });
    }

    /// Drop every facet selection and refilter immediately
    pub fn clear_filters(&self) {
        let mut schedule = self.shared.schedule();
        schedule.filter_timer = schedule.filter_timer.next();
        self.shared.state.send_modify(|s| {
            s.selection_mut().clear();
            s.refilter();
        });
    }

    /// Cancel any pending search and reset the query and its results.
    ///
    /// Facet selections are kept.
    pub fn clear_search(&self) {
        let mut schedule = self.shared.schedule();
        schedule.search = schedule.search.next();
        schedule.query_timer = schedule.query_timer.next();
        schedule.last_triggered = Some(String::new());

        self.shared.state.send_modify(|s| {
            s.set_query_text(String::new());
            s.reset_results();
        });
        debug!("Search cleared");
    }

    /// Generation of the most recently issued request
    pub fn current_generation(&self) -> Generation {
        self.shared.schedule().search
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        let mut schedule = self.shared.schedule();
        schedule.search = schedule.search.next();
        schedule.query_timer = schedule.query_timer.next();
        schedule.filter_timer = schedule.filter_timer.next();
    }
}

impl Shared {
    fn schedule(&self) -> MutexGuard<'_, Schedule> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a search for the current query; the caller holds the schedule lock
    fn trigger_search(self: &Arc<Self>, schedule: &mut Schedule) {
        schedule.search = schedule.search.next();
        let generation = schedule.search;

        let query = self.state.borrow().query_text().trim().to_owned();
        schedule.last_triggered = Some(query.clone());

        if query.is_empty() {
            self.state.send_modify(SearchState::reset_results);
            debug!("Empty query, results cleared");
            return;
        }

        self.state.send_modify(SearchState::begin_search);
        info!("Searching for {:?} (generation {})", query, generation.value());

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = shared.client.fetch_by_name(&query).await;
            shared.complete_search(generation, query, outcome);
        });
    }

    fn complete_search(
        &self,
        generation: Generation,
        query: String,
        outcome: CatalogResult<Vec<Character>>,
    ) {
        let schedule = self.schedule();
        if schedule.search != generation {
            debug!(
                "Discarding result for {:?}: generation {} superseded by {}",
                query,
                generation.value(),
                schedule.search.value()
            );
            return;
        }

        match outcome {
            Ok(characters) => {
                info!("Search for {:?} returned {} characters", query, characters.len());
                self.state
                    .send_modify(|s| s.accept_results(query, characters));
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", query, e);
                self.state.send_modify(|s| s.fail(e.to_string()));
            }
        }
    }
}
