//! Offset-based pagination for the public catalog.
//!
//! ```rust,ignore
//! let page = OffsetPagination::validate(query.limit, query.offset)?;
//! let (items, total) = Resource::find_page(&filter, &page, pool).await?;
//! let info = PageInfo::new(total, &page, items.len());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("limit must be between 1 and {MAX_LIMIT}")]
    LimitOutOfRange,

    #[error("offset must not be negative")]
    NegativeOffset,
}

/// Validated limit/offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl OffsetPagination {
    /// Apply defaults and reject out-of-range values.
    ///
    /// Out-of-range values are rejected rather than clamped so clients learn
    /// about the bad request.
    pub fn validate(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PaginationError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PaginationError::LimitOutOfRange);
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(PaginationError::NegativeOffset);
        }

        Ok(Self { limit, offset })
    }
}

/// Pagination block returned alongside a page of items.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PageInfo {
    pub fn new(total: i64, page: &OffsetPagination, returned: usize) -> Self {
        Self {
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.offset + (returned as i64) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = OffsetPagination::validate(None, None).unwrap();
        assert_eq!(page, OffsetPagination::default());
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_rejects_out_of_range_limit() {
        assert_eq!(
            OffsetPagination::validate(Some(0), None),
            Err(PaginationError::LimitOutOfRange)
        );
        assert_eq!(
            OffsetPagination::validate(Some(101), None),
            Err(PaginationError::LimitOutOfRange)
        );
    }

    #[test]
    fn test_rejects_negative_offset() {
        assert_eq!(
            OffsetPagination::validate(Some(10), Some(-1)),
            Err(PaginationError::NegativeOffset)
        );
    }

    #[test]
    fn test_has_more() {
        let page = OffsetPagination::validate(Some(10), Some(10)).unwrap();
        assert!(PageInfo::new(25, &page, 10).has_more);
        assert!(!PageInfo::new(20, &page, 10).has_more);
        assert!(!PageInfo::new(15, &page, 5).has_more);
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = OffsetPagination::default();
        let json = serde_json::to_value(PageInfo::new(3, &page, 3)).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["total"], 3);
    }
}
