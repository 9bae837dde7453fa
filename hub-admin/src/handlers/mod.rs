//! HTTP handlers
//!
//! Each handler parses and validates its inputs, calls one service operation
//! (update and delete resolve the target first), and serializes the result.
//! Every failure is an [`crate::services::ApiError`] response.

pub mod hub_client;
pub mod role;

mod extract;
mod response;

pub use extract::{json_body, parse_id};
pub use response::{Paginated, PaginationMeta};
