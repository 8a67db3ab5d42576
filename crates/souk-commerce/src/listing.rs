//! Listing pagination.
//!
//! Every catalog and admin listing re-queries the backing store and slices
//! the result with skip = (page - 1) x page size. There is no caching layer.

use serde::{Deserialize, Serialize};

/// Page size on customer-facing shop listings.
pub const SHOP_PAGE_SIZE: i64 = 8;

/// Page size on admin listings.
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// Pagination info for a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
    /// Total number of pages: ceil(total / per_page).
    pub total_pages: i64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. The page is clamped to at least 1.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let page = page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, SHOP_PAGE_SIZE, 0)
    }
}

/// A page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Create a page of results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Create an empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 8, 0).total_pages, 1);
        assert_eq!(Pagination::new(1, 8, 8).total_pages, 1);
        assert_eq!(Pagination::new(1, 8, 9).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 45).total_pages, 5);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 8, 100).offset(), 0);
        assert_eq!(Pagination::new(3, 8, 100).offset(), 16);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let p = Pagination::new(0, 8, 20);
        assert_eq!(p.page, 1);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_navigation_flags() {
        let p = Pagination::new(2, 10, 45);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert!(!p.is_first());
        assert!(!p.is_last());

        let last = Pagination::new(5, 10, 45);
        assert!(!last.has_next);
        assert!(last.is_last());
    }
}
