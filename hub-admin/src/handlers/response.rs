//! Paginated response envelope
//!
//! ```rust
//! use hub_admin::handlers::PaginationMeta;
//!
//! let meta = PaginationMeta::new(25, 2, 10);
//! assert_eq!(meta.total_pages, 3);
//! assert_eq!(meta.previous, Some(1));
//! assert_eq!(meta.next_page_url.as_deref(), Some("?page=3&page_size=10"));
//! ```

use serde::{Deserialize, Serialize};

/// `{data, meta}` body of the paginate endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }
}

/// Position of a page within the full result set, with navigation links
///
/// Links are relative query strings. `first`, `previous`, and
/// `previous_page_url` appear only past the first page; `next`, `last`, and
/// `next_page_url` only before the last one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u64>,
    pub has_more: bool,
    pub has_previous: bool,
    pub is_empty: bool,
    pub first_page_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
    pub last_page_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_url: Option<String>,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let has_previous = page > 1;
        let has_more = page < total_pages;

        Self {
            total,
            current_page: page,
            per_page: page_size,
            total_pages,
            first: has_previous.then_some(1),
            previous: has_previous.then(|| page - 1),
            next: has_more.then(|| page + 1),
            last: has_more.then_some(total_pages),
            has_more,
            has_previous,
            is_empty: total == 0,
            first_page_url: page_url(1, page_size),
            next_page_url: has_more.then(|| page_url(page + 1, page_size)),
            last_page_url: page_url(total_pages, page_size),
            previous_page_url: has_previous.then(|| page_url(page - 1, page_size)),
        }
    }
}

fn page_url(page: u64, page_size: u64) -> String {
    format!("?page={page}&page_size={page_size}")
}
