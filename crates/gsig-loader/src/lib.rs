//! Progressive, resilient multi-source loading for the Growth Signals
//! dashboard.
//!
//! Fetches the dashboard's collections (leads, tweets, news, deals,
//! market ticks, stats) from the backend API in two tiers, tolerates
//! partial failures, supersedes cached tweets with live ones, debounces
//! structured filter changes, and exposes a locally filterable snapshot
//! view. See [`Orchestrator`] for the entry point.

pub mod config;
pub mod filter;
pub mod orchestrator;
pub mod progressive;
pub mod store;

mod cache_live;

pub use config::LoaderConfig;
pub use filter::{search_leads, tweets_above_threshold, LeadFilter};
pub use orchestrator::Orchestrator;
pub use progressive::LoadOutcome;
pub use store::{Collection, DashboardSnapshot, DashboardStore, LoadState};
