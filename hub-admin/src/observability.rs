//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize the global tracing subscriber
///
/// Production emits JSON lines; other environments use the human-readable
/// formatter. `RUST_LOG` is not consulted; the filter comes from
/// `service.log_level` and falls back to `info` when it does not parse.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = build_filter(&config.service.log_level);

    let installed = if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    // A subscriber may already be installed (tests, embedding); keep it.
    if installed.is_ok() {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    }

    Ok(())
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}
