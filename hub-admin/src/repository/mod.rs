//! Data access
//!
//! A generic, Postgres-backed repository over any [`Entity`], plus thin
//! per-entity repositories that add search and pagination:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hub_admin::repository::{ListOptions, PgRepository, RoleRepository};
//!
//! let roles = RoleRepository::new(Arc::new(PgRepository::new(pool)));
//! let options = ListOptions { search: "adm".into(), ..Default::default() };
//! let (page, total) = roles.paginate(&options, 1, 10).await?;
//! ```

mod error;
mod hub_client;
mod postgres;
mod query;
mod role;
mod traits;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use hub_client::HubClientRepository;
pub use postgres::PgRepository;
pub use query::{
    ColumnValue, Filter, FilterCondition, FilterOperator, ListOptions, OrderBy, OrderDirection,
    Pagination, Scope,
};
pub use role::RoleRepository;
pub use traits::{Entity, Repository, RepositoryResult, SoftDeleteRepository};
