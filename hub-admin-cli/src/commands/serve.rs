use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use hub_admin::prelude::*;

pub async fn execute(config_path: Option<&Path>, migrate: bool) -> Result<()> {
    let config = super::bootstrap(config_path)?;
    let pool = super::connect(&config).await?;

    if migrate {
        run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    println!(
        "{} {} on {}",
        "Serving".green().bold(),
        config.service.name,
        config.bind_address().cyan()
    );

    let app = router(AppState::new(config.clone(), pool));
    Server::new(config).serve(app).await.context("Server error")
}
