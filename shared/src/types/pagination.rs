//! Pagination parameters for the admin listing endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for account listings
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Hard cap applied to any requested page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Hard cap on search results
pub const SEARCH_RESULT_CAP: u32 = 50;

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Offset/limit pagination for list queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip
    #[serde(default)]
    pub offset: u32,

    /// Maximum number of rows to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a pagination with clamped values
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build from optional query parameters, falling back to defaults
    pub fn from_query(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self::new(
            offset.unwrap_or(0),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Offset as i64 for SQL binding
    pub fn offset_i64(&self) -> i64 {
        self.offset as i64
    }

    /// Limit as i64 for SQL binding
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}
