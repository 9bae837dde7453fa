use serde::Serialize;
use sqlx::FromRow;

use super::BaseFields;
use crate::repository::{ColumnValue, Entity};

/// A tenant of the hub, identified externally by `external_id`
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct HubClient {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    pub name: String,
    pub external_id: i64,
}

impl HubClient {
    pub fn new(name: impl Into<String>, external_id: i64) -> Self {
        Self {
            base: BaseFields::new(),
            name: name.into(),
            external_id,
        }
    }
}

impl Entity for HubClient {
    const TABLE: &'static str = "hub_clients";
    const NAME: &'static str = "HubClient";
    const SORTABLE_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "external_id",
        "active",
        "created_at",
        "updated_at",
    ];
    const UNIQUE_COLUMNS: &'static [&'static str] = &["external_id"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("external_id", self.external_id.into()),
        ]
    }
}
