//! Offset/limit normalisation for list commands.
//!
//! Requests carry signed offsets and limits. Negative values clamp to zero
//! and the limit is capped at the server's page size; any further clamping
//! against the data happens in the query engine.

use serde::Deserialize;

/// Default page size when `limit` is not specified.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Default upper bound on a single page.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Common pagination parameters accepted by list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Offset as an index, negatives clamped to 0.
    pub fn effective_offset(&self) -> usize {
        usize::try_from(self.offset.max(0)).unwrap_or(usize::MAX)
    }

    /// Limit clamped to `[0, max_page_size]`.
    pub fn effective_limit(&self, max_page_size: usize) -> usize {
        usize::try_from(self.limit.max(0))
            .unwrap_or(usize::MAX)
            .min(max_page_size)
    }
}
