//! # hub-admin
//!
//! Administration backend for hub clients and roles: a JSON REST API over
//! PostgreSQL with search, sorting, pagination, and soft delete.
//!
//! ## Layers
//!
//! - [`repository`]: generic Postgres CRUD with a not-deleted scope, plus
//!   per-entity search and pagination
//! - [`services`]: use cases; storage failures become [`services::ApiError`]
//! - [`dto`] and [`handlers`]: request parsing, validation, and responses
//! - [`routes`] and [`server`]: the axum router and its middleware stack
//!
//! ## Example
//!
//! ```rust,no_run
//! use hub_admin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!
//!     let app = router(AppState::new(config.clone(), pool));
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod server;
pub mod services;
pub mod state;

/// Common imports for binaries and integration tests
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::{create_pool, run_migrations};
    pub use crate::error::{Error, Result};
    pub use crate::observability::init_tracing;
    pub use crate::routes::router;
    pub use crate::seed::{SeedReport, Seeder};
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
