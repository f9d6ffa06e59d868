//! Lead and tweet filtering.
//!
//! Two mechanisms coexist, per the dashboard's behavior: a synchronous
//! free-text projection over the in-memory leads (no network), and
//! structured filters that debounce into one `/leads` re-fetch carrying
//! the filter values as query parameters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gsig_api::{ApiClient, Lead, LeadQuery, Priority, Tweet};

use crate::store::{Collection, DashboardStore};

/// Structured lead filters, sent server-side on change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    pub role: Option<String>,
    pub geography: Option<String>,
    pub priority: Option<Priority>,
    pub min_score: Option<f64>,
}

impl LeadFilter {
    /// Combines the structured filters with the active targeting context
    /// into one `/leads` query.
    #[must_use]
    pub fn to_query(&self, context: Option<String>) -> LeadQuery {
        LeadQuery {
            role: self.role.clone(),
            geography: self.geography.clone(),
            priority: self.priority,
            min_score: self.min_score,
            context,
        }
    }
}

/// Case-insensitive free-text projection over a leads snapshot.
///
/// Matches the term as a substring of name, role, or company. An empty
/// or whitespace-only term matches everything. Pure function; the input
/// snapshot is never mutated.
#[must_use]
pub fn search_leads(leads: &[Lead], term: &str) -> Vec<Lead> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return leads.to_vec();
    }
    leads
        .iter()
        .filter(|lead| {
            lead.name.to_lowercase().contains(&needle)
                || lead.role.to_lowercase().contains(&needle)
                || lead.company.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Tweets strictly above the relevance threshold, for display.
#[must_use]
pub fn tweets_above_threshold(tweets: &[Tweet], threshold: f64) -> Vec<Tweet> {
    tweets
        .iter()
        .filter(|tweet| tweet.relevance_score > threshold)
        .cloned()
        .collect()
}

/// Debounces structured filter changes into a single leads re-fetch.
///
/// Every [`submit`](FilterDebouncer::submit) bumps a generation counter
/// and schedules a task holding that generation's query; when the window
/// elapses, only the task still matching the counter fires, so a burst of
/// rapid changes produces exactly one request carrying the final values.
pub struct FilterDebouncer {
    api: Arc<ApiClient>,
    store: Arc<DashboardStore>,
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl FilterDebouncer {
    pub(crate) fn new(api: Arc<ApiClient>, store: Arc<DashboardStore>, window: Duration) -> Self {
        Self {
            api,
            store,
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules a debounced `/leads` re-fetch with `query`.
    ///
    /// Supersedes any still-pending submission. Only the Leads collection
    /// is affected; a failed re-fetch is logged and leaves the previous
    /// leads in place. The returned handle resolves once this
    /// submission's window has elapsed and its fetch (if still the
    /// latest) has settled; dropping it detaches the task.
    pub fn submit(&self, query: LeadQuery) -> tokio::task::JoinHandle<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if latest.load(Ordering::SeqCst) != generation {
                // Superseded within the window.
                return;
            }
            let ticket = store.begin(Collection::Leads);
            match api.get_leads(&query).await {
                Ok(leads) => {
                    store.commit_leads(ticket, leads);
                }
                Err(e) => {
                    tracing::warn!(
                        source = "leads",
                        error = %e,
                        "debounced lead re-fetch failed; keeping previous leads"
                    );
                }
            }
        })
    }
}
