//! The dashboard data orchestrator.
//!
//! Wires the store, the progressive loader, the filter debouncer, and
//! the re-analysis trigger behind one facade. A presentation layer (or
//! the CLI) holds an [`Orchestrator`], triggers loads and filter
//! changes, and reads [`DashboardSnapshot`]s — nothing else mutates the
//! state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gsig_api::{ApiClient, Lead, LeadQuery, Tweet};

use crate::config::LoaderConfig;
use crate::filter::{search_leads, tweets_above_threshold, FilterDebouncer, LeadFilter};
use crate::progressive::{LoadOutcome, ProgressiveLoader};
use crate::store::{DashboardSnapshot, DashboardStore};

pub struct Orchestrator {
    api: Arc<ApiClient>,
    store: Arc<DashboardStore>,
    loader: ProgressiveLoader,
    debouncer: FilterDebouncer,
    filter: Mutex<LeadFilter>,
    /// Targeting context from the most recent re-analysis, carried into
    /// every subsequent leads/news/deals/live-tweets fetch.
    context: Mutex<Option<String>>,
    config: LoaderConfig,
}

impl Orchestrator {
    #[must_use]
    pub fn new(api: ApiClient, config: LoaderConfig) -> Self {
        let api = Arc::new(api);
        let store = Arc::new(DashboardStore::new());
        let loader = ProgressiveLoader::new(Arc::clone(&api), Arc::clone(&store), config.clone());
        let debouncer = FilterDebouncer::new(
            Arc::clone(&api),
            Arc::clone(&store),
            config.filter_debounce,
        );
        Self {
            api,
            store,
            loader,
            debouncer,
            filter: Mutex::new(LeadFilter::default()),
            context: Mutex::new(None),
            config,
        }
    }

    /// Runs one full progressive load cycle with the active filters and
    /// targeting context. Ignored (returns [`LoadOutcome::Skipped`]) when
    /// a cycle is already in flight.
    pub async fn load(&self) -> LoadOutcome {
        self.loader.load(&self.current_query()).await
    }

    /// Applies a structured filter change.
    ///
    /// The change takes effect through a debounced `/leads` re-fetch;
    /// rapid successive changes collapse into one request carrying the
    /// final values. Await the returned handle to observe the re-fetch
    /// settle; dropping it detaches the task.
    pub fn set_filter(&self, filter: LeadFilter) -> tokio::task::JoinHandle<()> {
        *lock(&self.filter) = filter;
        self.debouncer.submit(self.current_query())
    }

    /// Re-analyzes the targeting description, then refreshes the data.
    ///
    /// Posts the description to the analysis endpoint (the result is
    /// logged; the backend folds it into subsequent context-scoped
    /// fetches), stores it as the active context, and re-runs the load
    /// cycle. The `analyzing` flag covers the whole span and always
    /// clears. Empty descriptions and re-entrant triggers are no-ops.
    pub async fn reanalyze(&self, description: &str) -> LoadOutcome {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            tracing::debug!("empty targeting description; re-analysis skipped");
            return LoadOutcome::Skipped;
        }
        if self.store.load_state().analyzing {
            tracing::debug!("re-analysis already running; trigger ignored");
            return LoadOutcome::Skipped;
        }

        self.store.set_analyzing(true);
        match self
            .api
            .analyze_content(trimmed, Some(&self.config.company_context))
            .await
        {
            Ok(outcome) => {
                tracing::info!(
                    signals = outcome.intent_signals.len(),
                    priority = %outcome.priority,
                    "targeting analysis completed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "targeting analysis failed; reloading anyway");
            }
        }

        *lock(&self.context) = Some(trimmed.to_string());
        let outcome = self.loader.load(&self.current_query()).await;
        self.store.set_analyzing(false);
        outcome
    }

    /// Read-only snapshot of the current dashboard state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.store.snapshot()
    }

    /// Free-text projection over the current leads snapshot.
    #[must_use]
    pub fn search_leads(&self, term: &str) -> Vec<Lead> {
        search_leads(&self.store.snapshot().leads, term)
    }

    /// Tweets currently above the configured relevance threshold.
    #[must_use]
    pub fn display_tweets(&self) -> Vec<Tweet> {
        tweets_above_threshold(
            &self.store.snapshot().tweets,
            self.config.tweet_relevance_threshold,
        )
    }

    /// Clears all loaded data and flags; the active filters and context
    /// are cleared too. In-flight requests from before the reset cannot
    /// re-apply old data afterwards.
    pub fn reset(&self) {
        *lock(&self.filter) = LeadFilter::default();
        *lock(&self.context) = None;
        self.store.reset();
    }

    fn current_query(&self) -> LeadQuery {
        let context = lock(&self.context).clone();
        lock(&self.filter).to_query(context)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
