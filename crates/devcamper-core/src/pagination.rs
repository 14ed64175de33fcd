//! Pagination utilities for listing responses.
//!
//! Listings are page-based: `page` (1-indexed, default 1) and `limit`
//! (items per page, default 25). Raw values are read the way a lenient
//! integer parser would: leading digits are kept and anything after them is
//! dropped, so `page=2.7` is page 2 and `limit=10abc` is 10. Missing,
//! non-numeric or non-positive values fall back to the defaults.
//!
//! The response carries only neighbour descriptors:
//!
//! ```json
//! {
//!   "pagination": {
//!     "next": { "page": 3, "limit": 10 },
//!     "prev": { "page": 1, "limit": 10 }
//!   }
//! }
//! ```
//!
//! `next` is present iff `page * limit < total`, `prev` iff `page > 1`.
//!
//! No upper bound is applied to `limit` here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 25;

/// Reads the leading integer of `raw`, ignoring surrounding whitespace and
/// any trailing garbage. Returns `None` when no digit leads the value.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long inputs instead of rejecting them.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(parse_leading_int)
        .filter(|v| *v > 0)
        .map(|v| v as u64)
        .unwrap_or(default)
}

/// Neighbour page descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageLink {
    pub page: u64,
    pub limit: u64,
}

/// Prev/next descriptors of a listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

/// Requested page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Zero is treated as "not given".
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// `(page - 1) * limit`, also the number of documents to skip.
    #[must_use]
    pub fn start_index(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `page * limit`.
    #[must_use]
    pub fn end_index(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    #[must_use]
    pub fn skip(&self) -> u64 {
        self.start_index()
    }

    /// Builds the prev/next descriptors for `total` matching documents.
    #[must_use]
    pub fn pagination(&self, total: u64) -> Pagination {
        let next = (self.end_index() < total).then_some(PageLink {
            page: self.page + 1,
            limit: self.limit,
        });
        let prev = (self.start_index() > 0).then_some(PageLink {
            page: self.page - 1,
            limit: self.limit,
        });

        Pagination { next, prev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let request = PageRequest::from_raw(None, None);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 25);
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn test_defaults_when_not_numeric() {
        let request = PageRequest::from_raw(Some("abc"), Some(""));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn test_truncates_fraction_and_suffix() {
        let request = PageRequest::from_raw(Some("2.7"), Some("10abc"));
        assert_eq!(request.page(), 2);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_zero_and_negative_fall_back() {
        let request = PageRequest::from_raw(Some("0"), Some("-5"));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn test_no_upper_bound_on_limit() {
        let request = PageRequest::from_raw(None, Some("5000"));
        assert_eq!(request.limit(), 5000);
    }

    #[test]
    fn test_indices() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.start_index(), 20);
        assert_eq!(request.end_index(), 30);
        assert_eq!(request.skip(), 20);
    }

    #[test]
    fn test_first_of_three_pages() {
        let pagination = PageRequest::new(1, 10).pagination(30);
        assert_eq!(pagination.next, Some(PageLink { page: 2, limit: 10 }));
        assert_eq!(pagination.prev, None);
    }

    #[test]
    fn test_middle_of_three_pages() {
        let pagination = PageRequest::new(2, 10).pagination(30);
        assert_eq!(pagination.next, Some(PageLink { page: 3, limit: 10 }));
        assert_eq!(pagination.prev, Some(PageLink { page: 1, limit: 10 }));
    }

    #[test]
    fn test_last_of_three_pages() {
        let pagination = PageRequest::new(3, 10).pagination(30);
        assert_eq!(pagination.next, None);
        assert_eq!(pagination.prev, Some(PageLink { page: 2, limit: 10 }));
    }

    #[test]
    fn test_page_past_the_end_still_links_back() {
        let pagination = PageRequest::new(7, 10).pagination(30);
        assert_eq!(pagination.next, None);
        assert_eq!(pagination.prev, Some(PageLink { page: 6, limit: 10 }));
    }

    #[test]
    fn test_empty_result_has_no_links() {
        assert_eq!(PageRequest::default().pagination(0), Pagination::default());
    }

    #[test]
    fn test_pagination_serializes_only_present_links() {
        let pagination = PageRequest::new(1, 10).pagination(30);
        let serialized = serde_json::to_string(&pagination).unwrap();
        assert_eq!(serialized, r#"{"next":{"page":2,"limit":10}}"#);

        let empty = serde_json::to_string(&Pagination::default()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn test_leading_int_parser() {
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("+7x"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
