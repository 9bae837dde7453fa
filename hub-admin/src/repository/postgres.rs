//! PostgreSQL implementation of the generic repository
//!
//! SQL is assembled with [`sqlx::QueryBuilder`]; every value is a bound
//! parameter and every identifier comes from an [`Entity`] definition.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::error::{RepositoryError, RepositoryOperation};
use super::query::{ColumnValue, Filter, FilterCondition, FilterOperator, OrderBy, Pagination, Scope};
use super::traits::{Entity, Repository, RepositoryResult, SoftDeleteRepository};
use crate::models::Identifiable;

/// Generic repository over one entity table
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<E> {
        let filter = Filter::new().and(FilterCondition::eq("id", id));
        let mut query = select_query::<E>(&filter, None, Some(Pagination::new(0, 1)));

        query
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindById, e))?
            .ok_or_else(|| RepositoryError::not_found(E::NAME, id))
    }

    async fn create(&self, entity: &E) -> RepositoryResult<E> {
        let mut query = insert_query(entity);

        let created = query
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Create, e))?;

        tracing::debug!(entity = E::NAME, id = created.id(), "Created record");
        Ok(created)
    }

    async fn update(&self, entity: &E) -> RepositoryResult<E> {
        let id = entity.id();
        let mut query = update_query(entity);

        query
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::Update, e).with_entity(E::NAME, id)
            })?
            .ok_or_else(|| {
                RepositoryError::not_found(E::NAME, id).with_operation(RepositoryOperation::Update)
            })
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut query = delete_query::<E>(id);

        let affected = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::Delete, e).with_entity(E::NAME, id)
            })?
            .rows_affected();

        if affected == 0 {
            return Err(
                RepositoryError::not_found(E::NAME, id).with_operation(RepositoryOperation::Delete)
            );
        }

        tracing::debug!(entity = E::NAME, id, "Deleted record");
        Ok(())
    }

    async fn find_all(
        &self,
        filter: &Filter,
        order: Option<OrderBy>,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<E>> {
        let mut query = select_query::<E>(filter, order, pagination);

        query
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))
    }

    async fn count(&self, filter: &Filter) -> RepositoryResult<u64> {
        let mut query = count_query::<E>(filter);

        let total: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Count, e))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl<E: Entity> SoftDeleteRepository<E> for PgRepository<E> {
    async fn soft_delete(&self, entity: &E) -> RepositoryResult<E> {
        let id = entity.id();
        let mut query = soft_delete_query::<E>(id);

        let deleted = query
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::SoftDelete, e)
                    .with_entity(E::NAME, id)
            })?
            .ok_or_else(|| {
                RepositoryError::not_found(E::NAME, id)
                    .with_operation(RepositoryOperation::SoftDelete)
            })?;

        tracing::debug!(entity = E::NAME, id, "Soft-deleted record");
        Ok(deleted)
    }
}

fn select_query<E: Entity>(
    filter: &Filter,
    order: Option<OrderBy>,
    pagination: Option<Pagination>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT * FROM {}", E::TABLE));
    push_where(&mut query, Scope::NotDeleted, filter);

    if let Some(order) = order {
        query.push(format_args!(
            " ORDER BY {} {}",
            order.column,
            order.direction.as_sql()
        ));
        // id breaks ties so LIMIT/OFFSET windows are stable
        if order.column != "id" {
            query.push(format_args!(", id {}", order.direction.as_sql()));
        }
    }

    if let Some(pagination) = pagination {
        query
            .push(" LIMIT ")
            .push_bind(to_sql_int(pagination.limit))
            .push(" OFFSET ")
            .push_bind(to_sql_int(pagination.offset));
    }

    query
}

fn count_query<E: Entity>(filter: &Filter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
    push_where(&mut query, Scope::NotDeleted, filter);
    query
}

fn insert_query<E: Entity>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let columns = writable_columns(entity);

    let mut query = QueryBuilder::new(format!("INSERT INTO {} (", E::TABLE));
    for (i, (name, _)) in columns.iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        query.push(*name);
    }

    query.push(") VALUES (");
    for (i, (_, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        push_value(&mut query, value);
    }
    query.push(") RETURNING *");

    query
}

fn update_query<E: Entity>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));

    for (name, value) in writable_columns(entity) {
        query.push(format_args!("{} = ", name));
        push_value(&mut query, value);
        query.push(", ");
    }
    query.push("updated_at = NOW()");

    let filter = Filter::new().and(FilterCondition::eq("id", entity.id()));
    push_where(&mut query, Scope::NotDeleted, &filter);
    query.push(" RETURNING *");

    query
}

fn delete_query<E: Entity>(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("DELETE FROM {}", E::TABLE));
    let filter = Filter::new().and(FilterCondition::eq("id", id));
    push_where(&mut query, Scope::NotDeleted, &filter);
    query
}

fn soft_delete_query<E: Entity>(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "UPDATE {} SET is_deleted = TRUE, \
         deleted_at = COALESCE(deleted_at, NOW()), \
         updated_at = CASE WHEN is_deleted THEN updated_at ELSE NOW() END",
        E::TABLE
    ));
    let filter = Filter::new().and(FilterCondition::eq("id", id));
    push_where(&mut query, Scope::WithDeleted, &filter);
    query.push(" RETURNING *");
    query
}

/// `active` plus the entity's business columns
fn writable_columns<E: Entity>(entity: &E) -> Vec<(&'static str, ColumnValue)> {
    let mut columns = vec![("active", ColumnValue::Bool(entity.base().active))];
    columns.extend(entity.fields());
    columns
}

/// Append the scope predicate and filter groups as a WHERE clause
fn push_where(query: &mut QueryBuilder<'static, Postgres>, scope: Scope, filter: &Filter) {
    let mut keyword = " WHERE ";

    if let Some(predicate) = scope.predicate() {
        query.push(keyword).push(predicate);
        keyword = " AND ";
    }

    for group in filter.groups() {
        query.push(keyword);
        keyword = " AND ";

        let grouped = group.len() > 1;
        if grouped {
            query.push("(");
        }
        for (i, condition) in group.iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            push_condition(query, condition);
        }
        if grouped {
            query.push(")");
        }
    }
}

fn push_condition(query: &mut QueryBuilder<'static, Postgres>, condition: &FilterCondition) {
    query.push(condition.column);
    match (&condition.operator, &condition.value) {
        (FilterOperator::Contains, ColumnValue::Text(needle)) => {
            query
                .push(" ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)))
                .push(r" ESCAPE '\'");
        }
        (operator, value) => {
            query.push(format_args!(" {} ", operator));
            push_value(query, value.clone());
        }
    }
}

fn push_value(query: &mut QueryBuilder<'static, Postgres>, value: ColumnValue) {
    match value {
        ColumnValue::Bool(v) => query.push_bind(v),
        ColumnValue::Int(v) => query.push_bind(v),
        ColumnValue::BigInt(v) => query.push_bind(v),
        ColumnValue::NullBigInt => query.push_bind(None::<i64>),
        ColumnValue::Text(v) => query.push_bind(v),
        ColumnValue::Json(v) => query.push_bind(v),
        ColumnValue::Timestamp(v) => query.push_bind(v),
    };
}

/// Make `%`, `_` and `\` match themselves inside an ILIKE pattern
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
