//! Request shapes and their validation rules

mod hub_client;
mod query;
mod role;
mod validation;

pub use hub_client::{CreateHubClient, HubClientListQuery, UpdateHubClient};
pub use query::{PageQuery, QueryMap};
pub use role::{CreateRole, RoleListQuery, UpdateRole};
pub use validation::{ensure_valid, field_errors, FieldError};
