use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use hub_admin::prelude::*;

pub async fn execute(config_path: Option<&Path>, count: usize) -> Result<()> {
    let config = super::bootstrap(config_path)?;
    let pool = super::connect(&config).await?;

    let report = Seeder::from_pool(pool)
        .run(count)
        .await
        .context("Seeding failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &SeedReport) {
    println!("{}", "Seeding complete".green().bold());
    println!("  {:<12} {}", "hub clients", report.hub_clients.to_string().cyan());
    println!("  {:<12} {}", "roles", report.roles.to_string().cyan());

    if report.skipped > 0 {
        println!(
            "  {:<12} {} {}",
            "skipped",
            report.skipped.to_string().yellow(),
            "(duplicate values)".dimmed()
        );
    }
}
