//! Pagination engine
//!
//! Pages are 1-indexed. Out-of-range page numbers are clamped instead of
//! rejected:
//! - `page < 1` is treated as page 1
//! - `page > total_pages` is treated as the last page, unless there are no
//!   pages at all, in which case the requested page is kept and the slice is
//!   empty
//!
//! Range checks on `page_size` belong to the caller. A `page_size` of zero
//! yields no pages and an empty slice.

use crate::core::record::ImageRecord;
use serde::Serialize;

/// Pagination metadata returned alongside a page of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Page actually served, after clamping
    pub page: usize,
    pub page_size: usize,
    /// Number of items across all pages
    pub total: usize,
    pub total_pages: usize,
}

/// A contiguous slice of the catalog plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T = ImageRecord> {
    pub data: &'a [T],
    pub pagination: PageInfo,
}

impl<'a, T> Page<'a, T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Number of pages needed for `total` items
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Cut page `page` of size `page_size` out of `items`
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total = items.len();
    let total_pages = total_pages(total, page_size);

    let mut page = page.max(1);
    if total_pages > 0 && page > total_pages {
        page = total_pages;
    }

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        data: &items[start..end],
        pagination: PageInfo {
            page,
            page_size,
            total,
            total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page() {
        let items: Vec<u32> = (0..5).collect();

        let first = paginate(&items, 1, 2);
        assert_eq!(first.data, &[0, 1]);
        assert_eq!(
            first.pagination,
            PageInfo {
                page: 1,
                page_size: 2,
                total: 5,
                total_pages: 3
            }
        );

        let last = paginate(&items, 3, 2);
        assert_eq!(last.data, &[4]);
        assert_eq!(last.pagination.page, 3);
    }

    #[test]
    fn test_page_zero_is_page_one() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 0, 2);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.data, &[0, 1]);
    }

    #[test]
    fn test_page_past_end_clamps_to_last() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 99, 2);
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.data, &[4]);
    }

    #[test]
    fn test_empty_items_keep_requested_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 4, 10);
        assert!(page.is_empty());
        assert_eq!(
            page.pagination,
            PageInfo {
                page: 4,
                page_size: 10,
                total: 0,
                total_pages: 0
            }
        );
    }

    #[test]
    fn test_huge_page_on_empty_items_does_not_overflow() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, usize::MAX, 100);
        assert!(page.is_empty());
        assert_eq!(page.pagination.page, usize::MAX);
    }

    #[test]
    fn test_zero_page_size() {
        let items: Vec<u32> = (0..3).collect();
        let page = paginate(&items, 1, 0);
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.total, 3);
    }

    #[test]
    fn test_exact_multiple() {
        let items: Vec<u32> = (0..6).collect();
        assert_eq!(total_pages(items.len(), 3), 2);
        assert_eq!(paginate(&items, 2, 3).data, &[3, 4, 5]);
    }

    #[test]
    fn test_page_info_json_shape() {
        let items = vec!["x"];
        let json = serde_json::to_value(paginate(&items, 1, 20).pagination).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 1, "page_size": 20, "total": 1, "total_pages": 1})
        );
    }
}
