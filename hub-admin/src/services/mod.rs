//! Business operations over the repositories
//!
//! Services hold no state beyond their repository; every storage failure is
//! converted to an [`ApiError`] on the way out.

mod error;
mod hub_client;
mod role;

pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use hub_client::HubClientService;
pub use role::RoleService;
