use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use hub_admin::prelude::*;

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = super::bootstrap(config_path)?;
    let pool = super::connect(&config).await?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    println!("{} Database schema is up to date", "✓".green().bold());
    Ok(())
}
