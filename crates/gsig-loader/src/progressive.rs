//! Two-tier progressive loading.
//!
//! The critical tier (leads, stats, news, deals) fans out concurrently
//! and its loading flag clears only once the whole tier settles. The
//! secondary tier (market ticks plus the cache-then-live tweet cycle)
//! starts after a short stagger and never blocks interactivity. Every
//! fetch is isolated: a failure degrades that one collection to its
//! prior value and does not cancel siblings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gsig_api::{ApiClient, LeadQuery};

use crate::cache_live::CacheThenLiveLoader;
use crate::config::LoaderConfig;
use crate::store::{Collection, DashboardStore};

/// Result of a load trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The full cycle ran (both tiers settled).
    Completed,
    /// A cycle was already in flight; this trigger was ignored.
    Skipped,
}

pub struct ProgressiveLoader {
    api: Arc<ApiClient>,
    store: Arc<DashboardStore>,
    config: LoaderConfig,
    tweets: CacheThenLiveLoader,
    in_flight: AtomicBool,
}

impl ProgressiveLoader {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        store: Arc<DashboardStore>,
        config: LoaderConfig,
    ) -> Self {
        let tweets = CacheThenLiveLoader::new(Arc::clone(&api), Arc::clone(&store));
        Self {
            api,
            store,
            config,
            tweets,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one full load cycle with the given leads query.
    ///
    /// Re-entrant triggers while a cycle is in flight are ignored and
    /// return [`LoadOutcome::Skipped`] instead of issuing overlapping
    /// requests.
    pub async fn load(&self, query: &LeadQuery) -> LoadOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("load already in flight; ignoring re-entrant trigger");
            return LoadOutcome::Skipped;
        }
        self.run_cycle(query).await;
        self.in_flight.store(false, Ordering::SeqCst);
        LoadOutcome::Completed
    }

    async fn run_cycle(&self, query: &LeadQuery) {
        let context = query.context.as_deref();

        self.store.set_critical_loading(true);
        tokio::join!(
            self.fetch_leads(query),
            self.fetch_stats(),
            self.fetch_news(context),
            self.fetch_deals(context),
        );
        self.store.set_critical_loading(false);
        tracing::debug!("critical tier settled");

        tokio::time::sleep(self.config.secondary_tier_delay).await;
        tokio::join!(
            self.tweets.run(&self.config, context),
            self.fetch_market(),
        );
        tracing::debug!("secondary tier settled");
    }

    /// Leads fetch with the basic-search fallback: when the
    /// context-enhanced query fails, retry once with the context
    /// stripped before giving up.
    async fn fetch_leads(&self, query: &LeadQuery) {
        let ticket = self.store.begin(Collection::Leads);
        match self.api.get_leads(query).await {
            Ok(leads) => {
                self.store.commit_leads(ticket, leads);
            }
            Err(e) if query.context.is_some() => {
                tracing::warn!(
                    source = "leads",
                    error = %e,
                    "enhanced lead fetch failed; falling back to basic search"
                );
                match self.api.get_leads(&query.without_context()).await {
                    Ok(leads) => {
                        self.store.commit_leads(ticket, leads);
                    }
                    Err(e) => {
                        tracing::warn!(
                            source = "leads",
                            error = %e,
                            "basic lead fetch failed; keeping previous leads"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    source = "leads",
                    error = %e,
                    "lead fetch failed; keeping previous leads"
                );
            }
        }
    }

    async fn fetch_stats(&self) {
        let ticket = self.store.begin(Collection::Stats);
        match self.api.get_stats().await {
            Ok(stats) => {
                self.store.commit_stats(ticket, stats);
            }
            Err(e) => {
                tracing::warn!(
                    source = "stats",
                    error = %e,
                    "stats fetch failed; keeping previous stats"
                );
            }
        }
    }

    async fn fetch_news(&self, context: Option<&str>) {
        let ticket = self.store.begin(Collection::News);
        match self.api.get_startup_news(context).await {
            Ok(news) => {
                self.store.commit_news(ticket, news);
            }
            Err(e) => {
                tracing::warn!(
                    source = "startup-news",
                    error = %e,
                    "news fetch failed; keeping previous news"
                );
            }
        }
    }

    async fn fetch_deals(&self, context: Option<&str>) {
        let ticket = self.store.begin(Collection::Deals);
        match self.api.get_deals(context).await {
            Ok(deals) => {
                self.store.commit_deals(ticket, deals);
            }
            Err(e) => {
                tracing::warn!(
                    source = "deals",
                    error = %e,
                    "deal fetch failed; keeping previous deals"
                );
            }
        }
    }

    async fn fetch_market(&self) {
        self.store.set_market_loading(true);
        let ticket = self.store.begin(Collection::MarketTicks);
        match self.api.get_market_data().await {
            Ok(ticks) => {
                self.store.commit_market(ticket, ticks);
            }
            Err(e) => {
                tracing::warn!(
                    source = "market-data",
                    error = %e,
                    "market data fetch failed; keeping previous ticks"
                );
            }
        }
        self.store.set_market_loading(false);
    }
}
