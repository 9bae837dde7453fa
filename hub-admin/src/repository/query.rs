//! Filtering, ordering, and pagination types for repository queries
//!
//! Filters are a conjunction of groups; each group is a disjunction of
//! conditions. `name ILIKE '%adm%' OR slug ILIKE '%adm%'` AND `active = true`
//! is two groups:
//!
//! ```rust
//! use hub_admin::repository::{Filter, FilterCondition};
//!
//! let filter = Filter::new()
//!     .and_any(vec![
//!         FilterCondition::contains("name", "adm"),
//!         FilterCondition::contains("slug", "adm"),
//!     ])
//!     .and(FilterCondition::eq("active", true));
//!
//! assert_eq!(filter.groups().len(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

use super::error::RepositoryError;
use super::traits::Entity;

/// A typed column value, used both for binding SQL parameters and for
/// evaluating filters outside the database
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Bool(bool),
    Int(i32),
    BigInt(i64),
    /// NULL in a nullable BIGINT column
    NullBigInt,
    Text(String),
    Json(serde_json::Value),
    Timestamp(DateTime<Utc>),
}

impl ColumnValue {
    /// Total order within a variant; values of different variants compare equal
    pub fn compare(&self, other: &Self) -> Ordering {
        use ColumnValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (BigInt(a), BigInt(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Json(a), Json(b)) => a.to_string().cmp(&b.to_string()),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            // NULLS LAST, as Postgres sorts ascending
            (NullBigInt, NullBigInt) => Ordering::Equal,
            (NullBigInt, _) => Ordering::Greater,
            (_, NullBigInt) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<Option<i64>> for ColumnValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::NullBigInt, Self::BigInt)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<serde_json::Value> for ColumnValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Case-insensitive substring match (ILIKE '%value%')
    Contains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Contains => write!(f, "ILIKE"),
        }
    }
}

/// A single condition on one column
///
/// Column names are `'static` because they always come from entity
/// definitions, never from request input.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub column: &'static str,
    pub operator: FilterOperator,
    pub value: ColumnValue,
}

impl FilterCondition {
    /// Equality filter (column = value)
    pub fn eq(column: &'static str, value: impl Into<ColumnValue>) -> Self {
        Self {
            column,
            operator: FilterOperator::Equal,
            value: value.into(),
        }
    }

    /// Case-insensitive substring filter (column ILIKE '%needle%')
    pub fn contains(column: &'static str, needle: impl Into<String>) -> Self {
        Self {
            column,
            operator: FilterOperator::Contains,
            value: ColumnValue::Text(needle.into()),
        }
    }
}

/// Conjunction of OR-groups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    groups: Vec<Vec<FilterCondition>>,
}

impl Filter {
    /// A filter matching every row
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a single condition
    #[must_use]
    pub fn and(mut self, condition: FilterCondition) -> Self {
        self.groups.push(vec![condition]);
        self
    }

    /// AND a group of conditions joined with OR; an empty group is ignored
    #[must_use]
    pub fn and_any(mut self, conditions: Vec<FilterCondition>) -> Self {
        if !conditions.is_empty() {
            self.groups.push(conditions);
        }
        self
    }

    pub fn groups(&self) -> &[Vec<FilterCondition>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Which rows a query may see
///
/// Every read, update, and delete runs with [`Scope::NotDeleted`]; only
/// soft delete itself uses [`Scope::WithDeleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    NotDeleted,
    WithDeleted,
}

impl Scope {
    /// SQL predicate for the scope, if any
    pub const fn predicate(&self) -> Option<&'static str> {
        match self {
            Self::NotDeleted => Some("is_deleted = FALSE"),
            Self::WithDeleted => None,
        }
    }
}

/// Direction for ordering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl OrderDirection {
    /// Parse a caller-supplied sort order
    ///
    /// Only the exact literal `desc` sorts descending; everything else,
    /// including `DESC` and garbage, sorts ascending. HTTP callers are
    /// lowercased before they get here.
    ///
    /// ```rust
    /// use hub_admin::repository::OrderDirection;
    ///
    /// assert_eq!(OrderDirection::from_param("desc"), OrderDirection::Descending);
    /// assert_eq!(OrderDirection::from_param("DESC"), OrderDirection::Ascending);
    /// assert_eq!(OrderDirection::from_param("sideways"), OrderDirection::Ascending);
    /// ```
    pub fn from_param(value: &str) -> Self {
        if value == "desc" {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// ORDER BY clause on a whitelisted column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: OrderDirection,
}

/// Offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Window for a 1-based page number
    ///
    /// ```rust
    /// use hub_admin::repository::Pagination;
    ///
    /// let page3 = Pagination::page(3, 20);
    /// assert_eq!(page3.offset, 40);
    /// assert_eq!(page3.limit, 20);
    /// ```
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        Self {
            offset: page_number.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// Search, filter, and sort parameters shared by list and paginate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Case-insensitive substring; empty means no search
    pub search: String,
    /// Filter on the `active` flag when set
    pub active: Option<bool>,
    /// Column to order by; empty means storage order by id
    pub sort_field: String,
    /// `desc` sorts descending, anything else ascending
    pub sort_order: String,
}

impl ListOptions {
    /// Build the filter for an entity searched over `search_columns`
    pub fn filter(&self, search_columns: &[&'static str]) -> Filter {
        let search = self.search.trim();
        let mut filter = Filter::new();

        if !search.is_empty() {
            filter = filter.and_any(
                search_columns
                    .iter()
                    .map(|column| FilterCondition::contains(*column, search))
                    .collect(),
            );
        }

        if let Some(active) = self.active {
            filter = filter.and(FilterCondition::eq("active", active));
        }

        filter
    }

    /// Resolve the requested ordering against the entity's sortable columns
    ///
    /// An empty sort field falls back to `id` ascending so pages are stable.
    pub fn order<E: Entity>(&self) -> Result<OrderBy, RepositoryError> {
        let direction = OrderDirection::from_param(&self.sort_order);

        if self.sort_field.is_empty() {
            return Ok(OrderBy {
                column: "id",
                direction: OrderDirection::Ascending,
            });
        }

        E::sortable_column(&self.sort_field)
            .map(|column| OrderBy { column, direction })
            .ok_or_else(|| {
                RepositoryError::validation_failed(format!(
                    "Cannot sort {} by '{}'",
                    E::NAME,
                    self.sort_field
                ))
            })
    }
}
