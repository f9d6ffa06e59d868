/// Runtime configuration for the dashboard data orchestrator.
///
/// All timing values are plain integers (milliseconds/seconds) rather than
/// `Duration` so the struct stays trivially `Clone` and printable; the
/// loader converts at the edge.
#[derive(Debug, Clone)]
pub struct GsigConfig {
    /// Root of the backend, without the `/api` prefix.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Delay between critical-tier completion and the secondary tier.
    pub secondary_tier_delay_ms: u64,
    /// Window between publishing cached tweets and requesting live ones.
    pub cache_to_live_delay_ms: u64,
    /// Debounce window for structured lead filter changes.
    pub filter_debounce_ms: u64,
    /// Tweets at or below this relevance score are hidden from the
    /// filtered view. Observed values differed across dashboard
    /// revisions; this makes the choice explicit.
    pub tweet_relevance_threshold: f64,
    /// Static context label sent with every content analysis request.
    pub company_context: String,
    pub log_level: String,
}
