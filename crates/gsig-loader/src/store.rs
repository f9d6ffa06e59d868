//! Dashboard state store.
//!
//! Owns every collection the orchestrator fetches and the load flags the
//! presentation layer reads. All mutation goes through sequence-checked
//! commits: each fetch takes a ticket via [`DashboardStore::begin`]
//! before issuing its request, and a commit whose ticket is older than
//! the last applied one is discarded. That makes "only the most recent
//! request's result is ever applied" hold even when overlapping cycles
//! race, with completion order decoupled from request order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gsig_api::{DashboardStats, Deal, Lead, MarketTick, NewsItem, Tweet};

/// The independently fetched collections the store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Leads,
    Tweets,
    News,
    Deals,
    MarketTicks,
    Stats,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Leads => write!(f, "leads"),
            Collection::Tweets => write!(f, "tweets"),
            Collection::News => write!(f, "news"),
            Collection::Deals => write!(f, "deals"),
            Collection::MarketTicks => write!(f, "market_ticks"),
            Collection::Stats => write!(f, "stats"),
        }
    }
}

/// Per-collection loading flags plus the combined re-analysis flag.
///
/// Each flag transitions `true` at fetch start and `false` on settle,
/// success or failure, independently of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadState {
    /// Covers the whole critical tier (leads, stats, news, deals).
    pub critical_loading: bool,
    pub tweets_loading: bool,
    pub market_loading: bool,
    /// Covers the full re-analysis span: the analysis call plus the
    /// subsequent reloads.
    pub analyzing: bool,
}

/// Read-only view of the store at one instant. Cloned out; mutating a
/// snapshot never touches the store.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub leads: Vec<Lead>,
    pub tweets: Vec<Tweet>,
    pub news: Vec<NewsItem>,
    pub deals: Vec<Deal>,
    pub market: Vec<MarketTick>,
    pub stats: DashboardStats,
    pub load: LoadState,
}

/// A value plus the sequence counters guarding it.
#[derive(Debug, Default)]
struct Versioned<T> {
    value: T,
    issued: u64,
    applied: u64,
}

impl<T> Versioned<T> {
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Applies `value` unless a newer ticket already committed.
    fn commit(&mut self, ticket: u64, value: T) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        self.value = value;
        true
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    leads: Versioned<Vec<Lead>>,
    tweets: Versioned<Vec<Tweet>>,
    news: Versioned<Vec<NewsItem>>,
    deals: Versioned<Vec<Deal>>,
    market: Versioned<Vec<MarketTick>>,
    stats: Versioned<DashboardStats>,
    load: LoadState,
}

/// Shared dashboard state with an explicit init/reset lifecycle.
#[derive(Debug, Default)]
pub struct DashboardStore {
    inner: Mutex<StoreInner>,
}

impl DashboardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all collections and flags back to their initial state.
    ///
    /// Sequence counters are deliberately preserved: a request still in
    /// flight across a reset carries a pre-reset ticket and must not be
    /// able to resurrect pre-reset data.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.leads.value = Vec::new();
        inner.tweets.value = Vec::new();
        inner.news.value = Vec::new();
        inner.deals.value = Vec::new();
        inner.market.value = Vec::new();
        inner.stats.value = DashboardStats::default();
        inner.load = LoadState::default();
    }

    /// Issues a ticket for an upcoming fetch of `collection`.
    ///
    /// Must be called before the request goes out; the returned ticket is
    /// handed back to the matching `commit_*` method.
    pub fn begin(&self, collection: Collection) -> u64 {
        let mut inner = self.lock();
        match collection {
            Collection::Leads => inner.leads.begin(),
            Collection::Tweets => inner.tweets.begin(),
            Collection::News => inner.news.begin(),
            Collection::Deals => inner.deals.begin(),
            Collection::MarketTicks => inner.market.begin(),
            Collection::Stats => inner.stats.begin(),
        }
    }

    pub fn commit_leads(&self, ticket: u64, leads: Vec<Lead>) -> bool {
        let applied = self.lock().leads.commit(ticket, leads);
        if !applied {
            log_stale(Collection::Leads, ticket);
        }
        applied
    }

    pub fn commit_tweets(&self, ticket: u64, tweets: Vec<Tweet>) -> bool {
        let applied = self.lock().tweets.commit(ticket, tweets);
        if !applied {
            log_stale(Collection::Tweets, ticket);
        }
        applied
    }

    pub fn commit_news(&self, ticket: u64, news: Vec<NewsItem>) -> bool {
        let applied = self.lock().news.commit(ticket, news);
        if !applied {
            log_stale(Collection::News, ticket);
        }
        applied
    }

    pub fn commit_deals(&self, ticket: u64, deals: Vec<Deal>) -> bool {
        let applied = self.lock().deals.commit(ticket, deals);
        if !applied {
            log_stale(Collection::Deals, ticket);
        }
        applied
    }

    pub fn commit_market(&self, ticket: u64, ticks: Vec<MarketTick>) -> bool {
        let applied = self.lock().market.commit(ticket, ticks);
        if !applied {
            log_stale(Collection::MarketTicks, ticket);
        }
        applied
    }

    pub fn commit_stats(&self, ticket: u64, stats: DashboardStats) -> bool {
        let applied = self.lock().stats.commit(ticket, stats);
        if !applied {
            log_stale(Collection::Stats, ticket);
        }
        applied
    }

    pub fn set_critical_loading(&self, loading: bool) {
        self.lock().load.critical_loading = loading;
    }

    pub fn set_tweets_loading(&self, loading: bool) {
        self.lock().load.tweets_loading = loading;
    }

    pub fn set_market_loading(&self, loading: bool) {
        self.lock().load.market_loading = loading;
    }

    pub fn set_analyzing(&self, analyzing: bool) {
        self.lock().load.analyzing = analyzing;
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.lock().load
    }

    /// Clones the current state out as a read-only snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let inner = self.lock();
        DashboardSnapshot {
            leads: inner.leads.value.clone(),
            tweets: inner.tweets.value.clone(),
            news: inner.news.value.clone(),
            deals: inner.deals.value.clone(),
            market: inner.market.value.clone(),
            stats: inner.stats.value.clone(),
            load: inner.load,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Store mutation never panics while holding the guard; recover the
        // inner state rather than propagating poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_stale(collection: Collection, ticket: u64) {
    tracing::debug!(%collection, ticket, "stale completion discarded");
}
