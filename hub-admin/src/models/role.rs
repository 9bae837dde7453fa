use serde::Serialize;
use sqlx::FromRow;

use super::BaseFields;
use crate::repository::{ColumnValue, Entity};

/// A named permission set; `slug` is unique
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Role {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    pub name: String,
    pub slug: String,
}

impl Role {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            base: BaseFields::new(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

impl Entity for Role {
    const TABLE: &'static str = "roles";
    const NAME: &'static str = "Role";
    const SORTABLE_COLUMNS: &'static [&'static str] =
        &["id", "name", "slug", "active", "created_at", "updated_at"];
    const UNIQUE_COLUMNS: &'static [&'static str] = &["slug"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("slug", self.slug.clone().into()),
        ]
    }
}
