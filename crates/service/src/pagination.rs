//! Pagination utilities for service layer
//!
//! Provides a `Pagination` struct, helpers to normalize inputs and the
//! `PageResult` envelope returned by paginated queries.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub page_size: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }.normalize()
    }

    /// Clamp `page` up to 1 and `page_size` into `[1, MAX_PAGE_SIZE]`.
    pub fn normalize(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build from untrusted text (query strings). Anything that does not parse
    /// as an integer falls back to the default; out-of-range numbers are clamped.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_lenient(page).unwrap_or(1);
        let page_size = parse_lenient(page_size).unwrap_or(DEFAULT_PAGE_SIZE as i64);
        Self {
            page: page.max(1) as u64,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE as i64) as u64,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        let p = self.normalize();
        (p.page - 1).saturating_mul(p.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, page_size: DEFAULT_PAGE_SIZE } }
}

fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// `ceil(total / page_size)`; zero when there are no rows.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 { 0 } else { total.div_ceil(page_size) }
}

/// One page of rows plus the metadata needed to render pagers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: Pagination) -> Self {
        let page = page.normalize();
        Self {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages: total_pages(total, page.page_size),
        }
    }
}
