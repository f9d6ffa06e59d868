use std::time::Duration;

use gsig_core::GsigConfig;

/// Timing and threshold knobs for the orchestrator.
///
/// Defaults match the dashboard's observed behavior; tests shrink the
/// delays to keep runs fast.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Stagger between critical-tier completion and the secondary tier.
    pub secondary_tier_delay: Duration,
    /// Window between publishing cached tweets and requesting live ones.
    pub cache_to_live_delay: Duration,
    /// Debounce window for structured lead filter changes.
    pub filter_debounce: Duration,
    /// Tweets at or below this relevance score are hidden from the
    /// filtered view.
    pub tweet_relevance_threshold: f64,
    /// Static context label sent with every content analysis request.
    pub company_context: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            secondary_tier_delay: Duration::from_millis(100),
            cache_to_live_delay: Duration::from_millis(2000),
            filter_debounce: Duration::from_millis(300),
            tweet_relevance_threshold: 4.0,
            company_context: "B2B growth consulting".to_string(),
        }
    }
}

impl From<&GsigConfig> for LoaderConfig {
    fn from(config: &GsigConfig) -> Self {
        Self {
            secondary_tier_delay: Duration::from_millis(config.secondary_tier_delay_ms),
            cache_to_live_delay: Duration::from_millis(config.cache_to_live_delay_ms),
            filter_debounce: Duration::from_millis(config.filter_debounce_ms),
            tweet_relevance_threshold: config.tweet_relevance_threshold,
            company_context: config.company_context.clone(),
        }
    }
}
