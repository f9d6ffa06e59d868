//! Typed HTTP client for the Growth Signals backend API.
//!
//! Wraps `reqwest` with one method per consumed endpoint under
//! `{BACKEND_URL}/api`, typed response envelopes, and categorized errors.
//! Missing collection fields in a response decode as empty sequences; the
//! caller decides what an empty result means.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AnalysisOutcome, DashboardStats, Deal, DealKind, EngagementMetrics, IntentAnalysis,
    IntentSignal, Lead, LeadQuery, MarketTick, NewsItem, Priority, Tweet,
};
