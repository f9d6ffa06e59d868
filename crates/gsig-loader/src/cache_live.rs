//! Cache-then-live tweet loading.
//!
//! Publishes the cached tweet set as soon as it arrives (first paint),
//! then after a fixed window requests the live variant. Live supersedes
//! cached only when it succeeds and is non-empty; an empty or failed
//! live result leaves the cached tweets authoritative for the session.

use std::sync::Arc;

use gsig_api::ApiClient;

use crate::config::LoaderConfig;
use crate::store::{Collection, DashboardStore};

pub(crate) struct CacheThenLiveLoader {
    api: Arc<ApiClient>,
    store: Arc<DashboardStore>,
}

impl CacheThenLiveLoader {
    pub(crate) fn new(api: Arc<ApiClient>, store: Arc<DashboardStore>) -> Self {
        Self { api, store }
    }

    /// Runs one cached-then-live cycle for the Tweets collection.
    pub(crate) async fn run(&self, config: &LoaderConfig, search_context: Option<&str>) {
        self.store.set_tweets_loading(true);
        let ticket = self.store.begin(Collection::Tweets);
        match self.api.get_cached_tweets().await {
            Ok(tweets) => {
                tracing::debug!(count = tweets.len(), "published cached tweets");
                self.store.commit_tweets(ticket, tweets);
            }
            Err(e) => {
                tracing::warn!(
                    source = "cached-tweets",
                    error = %e,
                    "cached tweet fetch failed; keeping previous tweets"
                );
            }
        }
        self.store.set_tweets_loading(false);

        tokio::time::sleep(config.cache_to_live_delay).await;

        let ticket = self.store.begin(Collection::Tweets);
        match self.api.get_live_tweets(search_context, true).await {
            Ok(live) if !live.is_empty() => {
                tracing::debug!(count = live.len(), "live tweets superseded cached set");
                self.store.commit_tweets(ticket, live);
            }
            Ok(_) => {
                tracing::debug!("live tweet fetch returned empty; keeping cached tweets");
            }
            Err(e) => {
                tracing::warn!(
                    source = "live-tweets",
                    error = %e,
                    "live tweet fetch failed; keeping cached tweets"
                );
            }
        }
    }
}
