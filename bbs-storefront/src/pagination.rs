//! Pagination for the store grid
//!
//! Six beats per page, 1-indexed, with the requested page clamped into range.

use serde::Serialize;

/// Beats shown per grid page
pub const PAGE_SIZE: usize = 6;

/// Grid position derived from result count and requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages (0 when there are no results)
    pub total_pages: usize,
    /// Index of the first item on this page
    pub offset: usize,
}

/// Clamp the requested grid page and locate its first beat
///
/// The page lands in `1..=total_pages`, or 1 when nothing matched.
///
/// # Examples
/// ```
/// use bbs_storefront::pagination::calculate_pagination;
///
/// // 8 beats = 2 pages (6 + 2)
/// let p = calculate_pagination(8, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 2);
/// assert_eq!(p.offset, 6);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(8, 99);
/// assert_eq!(p.page, 2);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// One page of results plus the "Showing X-Y of Z" range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total: usize,
    /// 1-indexed position of the first item shown (0 when empty)
    pub start: usize,
    /// 1-indexed position of the last item shown
    pub end: usize,
}

/// Slice `items` down to the requested page
pub fn paginate<T: Clone>(items: &[T], requested_page: usize) -> Page<T> {
    let total = items.len();
    let p = calculate_pagination(total, requested_page);
    let end = (p.offset + PAGE_SIZE).min(total);
    let page_items = items[p.offset.min(total)..end].to_vec();

    Page {
        start: if page_items.is_empty() { 0 } else { p.offset + 1 },
        end,
        items: page_items,
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_beats_fill_two_pages() {
        let p = calculate_pagination(8, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_page_past_end_clamps_to_last() {
        let p = calculate_pagination(13, 99);
        assert_eq!(p.page, 3); // Clamped to last page
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let p = calculate_pagination(8, 0);
        assert_eq!(p.page, 1); // Clamped to first page
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_no_matches_has_zero_pages() {
        let p = calculate_pagination(0, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_twelve_beats_end_on_page_boundary() {
        let p = calculate_pagination(12, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 6);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let items: Vec<u32> = (1..=8).collect();
        let page = paginate(&items, 2);
        assert_eq!(page.items, vec![7, 8]);
        assert_eq!((page.start, page.end, page.total), (7, 8, 8));
    }

    #[test]
    fn test_paginate_full_first_page() {
        let items: Vec<u32> = (1..=8).collect();
        let page = paginate(&items, 1);
        assert_eq!(page.items, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!((page.start, page.end), (1, 6));
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 3);
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.total_pages, page.start, page.end), (1, 0, 0, 0));
    }
}
