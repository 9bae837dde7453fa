use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

/// hub-admin - administration backend for hub clients and roles
#[derive(Parser)]
#[command(name = "hub-admin")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Load configuration from this file instead of the search path
    #[arg(short, long, global = true, value_name = "FILE", env = "HUB_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },
    /// Apply database migrations
    #[command(visible_alias = "m")]
    Migrate,
    /// Insert fake hub clients and roles
    #[command(visible_aliases = ["s", "seeds"])]
    Seed {
        /// Number of records of each kind
        #[arg(default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve { migrate } => commands::serve::execute(config, migrate).await,
        Commands::Migrate => commands::migrate::execute(config).await,
        Commands::Seed { count } => commands::seed::execute(config, count).await,
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            if let Some(source) = e.source() {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
