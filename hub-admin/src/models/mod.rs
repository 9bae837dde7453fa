//! Persisted records
//!
//! Soft-deletable entities embed [`BaseFields`] and implement
//! [`crate::repository::Entity`]; join tables are plain rows.

mod base;
mod catalog;
mod hub_client;
mod links;
mod role;

pub use base::{BaseFields, Identifiable};
pub use catalog::{EntityRegister, MenuItem, Module, Product};
pub use hub_client::HubClient;
pub use links::{EntityRegisterProduct, MenuItemPermission, ModuleEntityRegister, ModulePermission};
pub use role::Role;
