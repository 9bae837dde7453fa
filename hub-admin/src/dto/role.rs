use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::query::{self, QueryMap, DEFAULT_SORT_FIELD};
use super::validation::{one_of, sort_order};
use crate::models::Role;
use crate::repository::{Entity, ListOptions};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRole {
    #[validate(required, length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(required, length(min = 3, max = 50))]
    pub slug: Option<String>,
}

impl CreateRole {
    pub fn into_model(self) -> Role {
        Role::new(self.name.unwrap_or_default(), self.slug.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 3, max = 50))]
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl UpdateRole {
    pub fn apply(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        if let Some(slug) = self.slug {
            role.slug = slug;
        }
        if let Some(active) = self.active {
            role.base.active = active;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RoleListQuery {
    pub search: String,
    pub active: Option<bool>,
    #[validate(custom(function = "role_sort_field"))]
    pub sort_field: String,
    #[validate(custom(function = "sort_order"))]
    pub sort_order: String,
}

impl RoleListQuery {
    pub fn from_query(params: &QueryMap) -> Self {
        Self {
            search: query::text(params, "search", ""),
            active: query::active(params),
            sort_field: query::text(params, "sort_field", DEFAULT_SORT_FIELD),
            sort_order: query::sort_order(params),
        }
    }

    pub fn into_options(self) -> ListOptions {
        ListOptions {
            search: self.search,
            active: self.active,
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        }
    }
}

fn role_sort_field(value: &str) -> Result<(), ValidationError> {
    one_of(value, Role::SORTABLE_COLUMNS)
}
