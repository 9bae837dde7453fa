//! Repository trait definitions
//!
//! - [`Entity`]: what a persisted record exposes to the generic repository
//! - [`Repository`]: identity-keyed CRUD plus filtered reads
//! - [`SoftDeleteRepository`]: adds the one operation that sees deleted rows
//!
//! The traits use `async_trait` so per-entity repositories can hold
//! `Arc<dyn SoftDeleteRepository<E>>` and swap storage backends.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow};

use super::error::RepositoryError;
use super::query::{ColumnValue, Filter, OrderBy, Pagination};
use crate::models::{BaseFields, Identifiable};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// A persisted record with the shared base columns
///
/// Implementors describe their table and business columns; the generic
/// repository handles the base columns (`id`, `active`, `is_deleted`,
/// `deleted_at`, `created_at`, `updated_at`).
pub trait Entity:
    Clone + Send + Sync + Unpin + 'static + for<'r> FromRow<'r, PgRow>
{
    /// Table name
    const TABLE: &'static str;
    /// Human-readable type name used in errors and logs
    const NAME: &'static str;
    /// Columns callers may order by
    const SORTABLE_COLUMNS: &'static [&'static str];
    /// Columns with a unique constraint
    const UNIQUE_COLUMNS: &'static [&'static str] = &[];

    fn base(&self) -> &BaseFields;

    fn base_mut(&mut self) -> &mut BaseFields;

    /// Business columns written on insert and update, excluding base columns
    fn fields(&self) -> Vec<(&'static str, ColumnValue)>;

    /// Current value of any column, base or business
    fn value_of(&self, column: &str) -> Option<ColumnValue> {
        let base = self.base();
        match column {
            "id" => Some(base.id.into()),
            "active" => Some(base.active.into()),
            "is_deleted" => Some(base.is_deleted.into()),
            "created_at" => Some(base.created_at.into()),
            "updated_at" => Some(base.updated_at.into()),
            _ => self
                .fields()
                .into_iter()
                .find_map(|(name, value)| (name == column).then_some(value)),
        }
    }

    /// Whitelisted column matching a caller-supplied sort field
    fn sortable_column(field: &str) -> Option<&'static str> {
        Self::SORTABLE_COLUMNS
            .iter()
            .copied()
            .find(|column| *column == field)
    }
}

impl<E: Entity> Identifiable for E {
    fn id(&self) -> i64 {
        self.base().id
    }
}

/// Base repository trait for CRUD operations
///
/// Every method except [`SoftDeleteRepository::soft_delete`] is scoped to rows
/// with `is_deleted = FALSE`.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fetch one record; `NotFound` when absent or soft-deleted
    async fn get_by_id(&self, id: i64) -> RepositoryResult<E>;

    /// Insert a record and return the stored row with id and timestamps
    async fn create(&self, entity: &E) -> RepositoryResult<E>;

    /// Overwrite every mutable column of the record with `entity.id()`
    async fn update(&self, entity: &E) -> RepositoryResult<E>;

    /// Physically remove a record
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Records matching `filter`, optionally ordered and windowed
    async fn find_all(
        &self,
        filter: &Filter,
        order: Option<OrderBy>,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<E>>;

    /// Number of records matching `filter`
    async fn count(&self, filter: &Filter) -> RepositoryResult<u64>;
}

/// Repository that can hide records without removing them
#[async_trait]
pub trait SoftDeleteRepository<E: Entity>: Repository<E> {
    /// Set `is_deleted` and `deleted_at` on the record with `entity.id()`
    ///
    /// Finds the row whatever its current flag; applying it twice keeps the
    /// first `deleted_at`.
    async fn soft_delete(&self, entity: &E) -> RepositoryResult<E>;
}
