//! Modules, products, entity registers, and menu items
//!
//! These records hang off hub clients and roles through foreign keys and the
//! join tables in [`super::links`]. They are persisted through the generic
//! repository but have no HTTP surface of their own.

use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use super::BaseFields;
use crate::repository::{ColumnValue, Entity};

/// A feature module enabled for a hub client
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Module {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    pub hub_client_id: i64,
    /// Localized title, e.g. `{"en": "Catalog"}`
    pub title: JsonValue,
    pub module_type: String,
    pub entities: i32,
    pub unlimited: bool,
}

impl Module {
    pub fn new(hub_client_id: i64, title: JsonValue, module_type: impl Into<String>) -> Self {
        Self {
            base: BaseFields::new(),
            hub_client_id,
            title,
            module_type: module_type.into(),
            entities: 1,
            unlimited: true,
        }
    }
}

impl Entity for Module {
    const TABLE: &'static str = "modules";
    const NAME: &'static str = "Module";
    const SORTABLE_COLUMNS: &'static [&'static str] =
        &["id", "hub_client_id", "module_type", "active", "created_at", "updated_at"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("hub_client_id", self.hub_client_id.into()),
            ("title", self.title.clone().into()),
            ("module_type", self.module_type.clone().into()),
            ("entities", self.entities.into()),
            ("unlimited", self.unlimited.into()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    /// Localized name
    pub name: JsonValue,
    pub product_type: String,
}

impl Product {
    pub fn new(name: JsonValue, product_type: impl Into<String>) -> Self {
        Self {
            base: BaseFields::new(),
            name,
            product_type: product_type.into(),
        }
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const NAME: &'static str = "Product";
    const SORTABLE_COLUMNS: &'static [&'static str] =
        &["id", "product_type", "active", "created_at", "updated_at"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("product_type", self.product_type.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct EntityRegister {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    pub structure_type: String,
}

impl EntityRegister {
    pub fn new(structure_type: impl Into<String>) -> Self {
        Self {
            base: BaseFields::new(),
            structure_type: structure_type.into(),
        }
    }
}

impl Entity for EntityRegister {
    const TABLE: &'static str = "entity_registers";
    const NAME: &'static str = "EntityRegister";
    const SORTABLE_COLUMNS: &'static [&'static str] =
        &["id", "structure_type", "active", "created_at", "updated_at"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![("structure_type", self.structure_type.clone().into())]
    }
}

/// Navigation entry of a module, optionally bound to an entity register
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MenuItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub base: BaseFields,
    pub module_id: i64,
    pub hub_client_id: i64,
    pub entity_register_id: Option<i64>,
    pub title: JsonValue,
    pub icon: String,
    pub item_type: String,
    pub link: String,
    pub menu_order: i32,
    pub view_type: String,
    pub active_on_header: bool,
    pub active_on_menu: bool,
    pub active_on_footer: bool,
    pub is_deletable: bool,
}

impl MenuItem {
    pub fn new(module_id: i64, hub_client_id: i64, title: JsonValue) -> Self {
        Self {
            base: BaseFields::new(),
            module_id,
            hub_client_id,
            entity_register_id: None,
            title,
            icon: String::new(),
            item_type: String::new(),
            link: String::new(),
            menu_order: 0,
            view_type: "public".to_string(),
            active_on_header: true,
            active_on_menu: true,
            active_on_footer: false,
            is_deletable: true,
        }
    }
}

impl Entity for MenuItem {
    const TABLE: &'static str = "menu_items";
    const NAME: &'static str = "MenuItem";
    const SORTABLE_COLUMNS: &'static [&'static str] =
        &["id", "menu_order", "view_type", "active", "created_at", "updated_at"];

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn fields(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("module_id", self.module_id.into()),
            ("hub_client_id", self.hub_client_id.into()),
            ("entity_register_id", self.entity_register_id.into()),
            ("title", self.title.clone().into()),
            ("icon", self.icon.clone().into()),
            ("item_type", self.item_type.clone().into()),
            ("link", self.link.clone().into()),
            ("menu_order", self.menu_order.into()),
            ("view_type", self.view_type.clone().into()),
            ("active_on_header", self.active_on_header.into()),
            ("active_on_menu", self.active_on_menu.into()),
            ("active_on_footer", self.active_on_footer.into()),
            ("is_deletable", self.is_deletable.into()),
        ]
    }
}
