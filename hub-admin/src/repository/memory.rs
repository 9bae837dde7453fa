//! In-memory repository backend for tests
//!
//! Mirrors the Postgres backend's observable behavior: the not-deleted scope,
//! unique columns, ILIKE-style search, ordering, and offset/limit windows.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::error::{RepositoryError, RepositoryOperation};
use super::query::{ColumnValue, Filter, FilterCondition, FilterOperator, OrderBy, OrderDirection, Pagination, Scope};
use super::traits::{Entity, Repository, RepositoryResult, SoftDeleteRepository};
use crate::models::Identifiable;

pub struct MemoryRepository<E> {
    state: Mutex<State<E>>,
}

struct State<E> {
    rows: Vec<E>,
    next_id: i64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Every stored row, soft-deleted ones included
    pub fn raw_rows(&self) -> Vec<E> {
        self.state.lock().unwrap().rows.clone()
    }

    fn check_unique(
        rows: &[E],
        candidate: &E,
        operation: RepositoryOperation,
    ) -> RepositoryResult<()> {
        for column in E::UNIQUE_COLUMNS {
            let value = candidate.value_of(column);
            let clash = rows.iter().any(|row| {
                row.id() != candidate.id() && value.is_some() && row.value_of(column) == value
            });
            if clash {
                return Err(RepositoryError::already_exists(E::NAME, column)
                    .with_operation(operation));
            }
        }
        Ok(())
    }
}

fn visible<E: Entity>(row: &E, scope: Scope) -> bool {
    match scope {
        Scope::NotDeleted => !row.base().is_deleted,
        Scope::WithDeleted => true,
    }
}

fn matches<E: Entity>(row: &E, filter: &Filter) -> bool {
    filter
        .groups()
        .iter()
        .all(|group| group.iter().any(|condition| condition_holds(row, condition)))
}

fn condition_holds<E: Entity>(row: &E, condition: &FilterCondition) -> bool {
    let Some(actual) = row.value_of(condition.column) else {
        return false;
    };
    match (condition.operator, &actual, &condition.value) {
        (FilterOperator::Contains, ColumnValue::Text(haystack), ColumnValue::Text(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        (FilterOperator::Contains, _, _) => false,
        (FilterOperator::Equal, actual, expected) => actual == expected,
    }
}

fn compare<E: Entity>(a: &E, b: &E, order: OrderBy) -> Ordering {
    let ordering = match (a.value_of(order.column), b.value_of(order.column)) {
        (Some(x), Some(y)) => x.compare(&y),
        _ => Ordering::Equal,
    }
    .then_with(|| a.id().cmp(&b.id()));
    match order.direction {
        OrderDirection::Ascending => ordering,
        OrderDirection::Descending => ordering.reverse(),
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<E> {
        let state = self.state.lock().unwrap();
        state
            .rows
            .iter()
            .find(|row| row.id() == id && visible(*row, Scope::NotDeleted))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(E::NAME, id))
    }

    async fn create(&self, entity: &E) -> RepositoryResult<E> {
        let mut state = self.state.lock().unwrap();

        let mut row = entity.clone();
        let now = Utc::now();
        {
            let base = row.base_mut();
            base.id = state.next_id;
            base.is_deleted = false;
            base.deleted_at = None;
            base.created_at = now;
            base.updated_at = now;
        }

        Self::check_unique(&state.rows, &row, RepositoryOperation::Create)?;

        state.next_id += 1;
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, entity: &E) -> RepositoryResult<E> {
        let mut state = self.state.lock().unwrap();
        let id = entity.id();

        let position = state
            .rows
            .iter()
            .position(|row| row.id() == id && visible(row, Scope::NotDeleted))
            .ok_or_else(|| {
                RepositoryError::not_found(E::NAME, id).with_operation(RepositoryOperation::Update)
            })?;

        Self::check_unique(&state.rows, entity, RepositoryOperation::Update)?;

        let stored = &mut state.rows[position];
        let mut row = entity.clone();
        {
            let previous = stored.base().clone();
            let base = row.base_mut();
            base.is_deleted = previous.is_deleted;
            base.deleted_at = previous.deleted_at;
            base.created_at = previous.created_at;
            base.updated_at = Utc::now();
        }
        *stored = row.clone();
        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state
            .rows
            .retain(|row| !(row.id() == id && visible(row, Scope::NotDeleted)));

        if state.rows.len() == before {
            return Err(
                RepositoryError::not_found(E::NAME, id).with_operation(RepositoryOperation::Delete)
            );
        }
        Ok(())
    }

    async fn find_all(
        &self,
        filter: &Filter,
        order: Option<OrderBy>,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<E>> {
        let state = self.state.lock().unwrap();

        let mut rows: Vec<E> = state
            .rows
            .iter()
            .filter(|row| visible(*row, Scope::NotDeleted) && matches(*row, filter))
            .cloned()
            .collect();

        if let Some(order) = order {
            rows.sort_by(|a, b| compare(a, b, order));
        }

        if let Some(pagination) = pagination {
            rows = rows
                .into_iter()
                .skip(pagination.offset as usize)
                .take(pagination.limit as usize)
                .collect();
        }

        Ok(rows)
    }

    async fn count(&self, filter: &Filter) -> RepositoryResult<u64> {
        let state = self.state.lock().unwrap();
        let total = state
            .rows
            .iter()
            .filter(|row| visible(*row, Scope::NotDeleted) && matches(*row, filter))
            .count();
        Ok(total as u64)
    }
}

#[async_trait]
impl<E: Entity> SoftDeleteRepository<E> for MemoryRepository<E> {
    async fn soft_delete(&self, entity: &E) -> RepositoryResult<E> {
        let mut state = self.state.lock().unwrap();
        let id = entity.id();

        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id() == id && visible(&**row, Scope::WithDeleted))
            .ok_or_else(|| {
                RepositoryError::not_found(E::NAME, id)
                    .with_operation(RepositoryOperation::SoftDelete)
            })?;

        let base = row.base_mut();
        if !base.is_deleted {
            base.updated_at = Utc::now();
        }
        base.is_deleted = true;
        base.deleted_at.get_or_insert_with(Utc::now);

        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HubClient, Module};
    use crate::repository::RepositoryErrorKind;

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let repo = MemoryRepository::<HubClient>::new();
        let created = repo.create(&HubClient::new("Acme", 42)).await.unwrap();
        assert_eq!(created.id(), 1);
        assert!(created.base.active);

        let second = repo.create(&HubClient::new("Globex", 43)).await.unwrap();
        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn test_unique_column_conflict() {
        let repo = MemoryRepository::<HubClient>::new();
        repo.create(&HubClient::new("Acme", 42)).await.unwrap();
        let err = repo.create(&HubClient::new("Other", 42)).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);
        assert_eq!(err.operation, RepositoryOperation::Create);
    }

    #[tokio::test]
    async fn test_entities_without_unique_columns() {
        let repo = MemoryRepository::<Module>::new();
        let title = serde_json::json!({"en": "Catalog"});
        repo.create(&Module::new(1, title.clone(), "catalog")).await.unwrap();
        repo.create(&Module::new(1, title, "catalog")).await.unwrap();
        assert_eq!(repo.count(&Filter::new()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row_but_hides_it() {
        let repo = MemoryRepository::<HubClient>::new();
        let created = repo.create(&HubClient::new("Acme", 42)).await.unwrap();

        let deleted = repo.soft_delete(&created).await.unwrap();
        assert!(deleted.base.is_deleted);
        assert!(deleted.base.deleted_at.is_some());

        assert_eq!(repo.raw_rows().len(), 1);
        let err = repo.get_by_id(created.id()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
    }
}
