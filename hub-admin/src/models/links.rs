//! Join tables
//!
//! Each pair is unique; inserting the same pair twice is a unique violation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Grants a role access to a module
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ModulePermission {
    pub id: i64,
    pub module_id: i64,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grants a role access to a menu item
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MenuItemPermission {
    pub id: i64,
    pub role_id: i64,
    pub menu_item_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ModuleEntityRegister {
    pub id: i64,
    pub module_id: i64,
    pub entity_register_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct EntityRegisterProduct {
    pub id: i64,
    pub product_id: i64,
    pub entity_register_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
