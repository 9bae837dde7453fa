use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Columns shared by every soft-deletable entity
///
/// `is_deleted` and `deleted_at` never appear in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BaseFields {
    pub id: i64,
    pub active: bool,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BaseFields {
    /// Base for a record that has not been stored yet
    ///
    /// The id and timestamps are placeholders until the insert returns the
    /// stored row.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for BaseFields {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything with a storage-assigned numeric identifier
pub trait Identifiable {
    fn id(&self) -> i64;
}
