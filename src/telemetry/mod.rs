//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over `logging.level` when it is set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_tracing(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(level = %config.level, json = config.json, "Tracing initialized");
}
