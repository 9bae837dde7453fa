//! Query-string parsing shared by the list and paginate endpoints
//!
//! Parameters arrive as a raw string map. Missing or empty values take their
//! defaults; unparseable numbers fall back to the default and an unparseable
//! `active` is treated as absent.

use std::collections::HashMap;

use validator::Validate;

pub type QueryMap = HashMap<String, String>;

pub const DEFAULT_SORT_FIELD: &str = "id";
pub const DEFAULT_SORT_ORDER: &str = "asc";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page window requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1))]
    pub page: i64,
    #[validate(range(min = 1, max = 100))]
    pub page_size: i64,
}

impl PageQuery {
    pub fn from_query(params: &QueryMap) -> Self {
        Self {
            page: number(params, "page", DEFAULT_PAGE),
            page_size: number(params, "page_size", DEFAULT_PAGE_SIZE),
        }
    }

    /// Page number; only meaningful after validation
    pub fn page(&self) -> u64 {
        u64::try_from(self.page).unwrap_or(1)
    }

    pub fn page_size(&self) -> u64 {
        u64::try_from(self.page_size).unwrap_or(1)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Trimmed text parameter, or `default` when missing or blank
pub(crate) fn text(params: &QueryMap, key: &str, default: &str) -> String {
    params
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub(crate) fn sort_order(params: &QueryMap) -> String {
    text(params, "sort_order", DEFAULT_SORT_ORDER).to_lowercase()
}

pub(crate) fn active(params: &QueryMap) -> Option<bool> {
    params.get("active").and_then(|value| parse_bool(value.trim()))
}

fn number(params: &QueryMap, key: &str, default: i64) -> i64 {
    params
        .get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Accepts the usual spellings: 1/0, t/f, true/false in lower, upper, or title case
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
