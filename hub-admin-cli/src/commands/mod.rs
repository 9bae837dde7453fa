pub mod migrate;
pub mod seed;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use hub_admin::database::PgPool;
use hub_admin::prelude::*;

/// Load configuration and start logging
///
/// An explicit `--config` file replaces the file search path; environment
/// variables still apply on top of it.
pub fn bootstrap(config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };

    init_tracing(&config).context("Failed to initialize logging")?;
    tracing::debug!(
        service = %config.service.name,
        environment = %config.service.environment,
        "configuration loaded"
    );
    Ok(config)
}

/// Connect to the configured database, retrying per configuration
pub async fn connect(config: &Config) -> Result<PgPool> {
    create_pool(&config.database)
        .await
        .context("Failed to connect to the database")
}
