use crate::app_config::GsigConfig;
use crate::ConfigError;

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config() -> Result<GsigConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config_from_env() -> Result<GsigConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<GsigConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let backend_url = require("GSIG_BACKEND_URL")?;

    let request_timeout_secs = parse_u64("GSIG_REQUEST_TIMEOUT_SECS", "30")?;
    let secondary_tier_delay_ms = parse_u64("GSIG_SECONDARY_TIER_DELAY_MS", "100")?;
    let cache_to_live_delay_ms = parse_u64("GSIG_CACHE_TO_LIVE_DELAY_MS", "2000")?;
    let filter_debounce_ms = parse_u64("GSIG_FILTER_DEBOUNCE_MS", "300")?;
    let tweet_relevance_threshold = parse_f64("GSIG_TWEET_RELEVANCE_THRESHOLD", "4.0")?;

    if !(0.0..=10.0).contains(&tweet_relevance_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GSIG_TWEET_RELEVANCE_THRESHOLD".to_string(),
            reason: format!("must be within 0..=10, got {tweet_relevance_threshold}"),
        });
    }

    let company_context = or_default("GSIG_COMPANY_CONTEXT", "B2B growth consulting");
    let log_level = or_default("GSIG_LOG_LEVEL", "info");

    Ok(GsigConfig {
        backend_url,
        request_timeout_secs,
        secondary_tier_delay_ms,
        cache_to_live_delay_ms,
        filter_debounce_ms,
        tweet_relevance_threshold,
        company_context,
        log_level,
    })
}
