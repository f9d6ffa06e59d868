//! Shared configuration for the Growth Signals dashboard tooling.
//!
//! Every tunable the orchestrator exposes (tier stagger, cache-to-live
//! window, filter debounce, tweet relevance threshold) is read from
//! `GSIG_`-prefixed environment variables with sensible defaults, so the
//! loader crates never reach into the environment themselves.

use thiserror::Error;

mod app_config;
mod config;

pub use app_config::GsigConfig;
pub use config::{load_config, load_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
