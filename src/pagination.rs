//! Pagination
//!
//! Offset based paging: page `n` of size `limit` skips `(n - 1) * limit` rows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page returned when none is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors raised for out of range paging parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    InvalidPage,

    /// A page holds at least one row.
    #[error("limit must be at least 1")]
    InvalidLimit,
}

/// Requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Creates a pagination request, applying defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns an error when `page` or `limit` is zero.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(PaginationError::InvalidPage);
        }

        if limit == 0 {
            return Err(PaginationError::InvalidLimit);
        }

        Ok(Self { page, limit })
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum rows per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paging metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Requested page
    pub page: u32,

    /// Total number of matching rows.
    ///
    /// Despite the name this is a row count, not a page count. The field
    /// name is part of the wire contract.
    pub total_pages: u64,

    /// Number of the last page holding rows, zero when nothing matches
    pub last_page: u64,
}

impl PageMeta {
    /// Computes paging metadata for `total` matching rows.
    pub fn new(pagination: Pagination, total: u64) -> Self {
        Self {
            page: pagination.page(),
            total_pages: total,
            last_page: total.div_ceil(u64::from(pagination.limit())),
        }
    }
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page
    pub data: Vec<T>,

    /// Paging metadata
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Converts every row, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
