//! Page arithmetic for listings

use serde::Serialize;

/// Number of page links shown around the current page
pub const DEFAULT_WINDOW: usize = 5;

/// Pagination state for one listing request
///
/// Pages are 1-indexed. The requested page is clamped into
/// `1..=total_pages`, and an empty listing still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub total_items: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl Paginator {
    pub fn new(total_items: usize, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        Self {
            total_items,
            page,
            per_page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    /// Zero-based index of the first item on this page
    pub fn start_index(&self) -> usize {
        ((self.page - 1) * self.per_page).min(self.total_items)
    }

    /// Zero-based, exclusive end of this page
    pub fn end_index(&self) -> usize {
        (self.start_index() + self.per_page).min(self.total_items)
    }

    /// Page numbers to display, centered on the current page where possible
    pub fn page_range(&self, window: usize) -> Vec<usize> {
        let window = window.max(1);
        let mut start = self.page.saturating_sub(window / 2).max(1);
        let end = (start + window).min(self.total_pages + 1);

        if end - start < window {
            start = end.saturating_sub(window).max(1);
        }

        (start..end).collect()
    }

    /// The items of `items` that fall on this page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end_index().min(items.len());
        let start = self.start_index().min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_bounds() {
        let p = Paginator::new(25, 2, 10);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_prev());
        assert!(p.has_next());
        assert_eq!(p.prev_page(), Some(1));
        assert_eq!(p.next_page(), Some(3));
        assert_eq!((p.start_index(), p.end_index()), (10, 20));
    }

    #[test]
    fn test_clamps_page() {
        let p = Paginator::new(30, 99, 10);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page, 3);
        assert!(!p.has_next());
        assert_eq!(p.next_page(), None);

        let p = Paginator::new(30, 0, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.prev_page(), None);
    }

    #[test]
    fn test_last_page_is_short() {
        let p = Paginator::new(25, 3, 10);
        assert_eq!((p.start_index(), p.end_index()), (20, 25));
    }

    #[test]
    fn test_empty_listing() {
        let p = Paginator::new(0, 5, 10);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!((p.start_index(), p.end_index()), (0, 0));
        assert_eq!(p.page_range(DEFAULT_WINDOW), vec![1]);
    }

    #[test]
    fn test_page_range_window() {
        assert_eq!(Paginator::new(100, 5, 10).page_range(5), vec![3, 4, 5, 6, 7]);
        assert_eq!(Paginator::new(100, 1, 10).page_range(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(Paginator::new(100, 10, 10).page_range(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(Paginator::new(30, 2, 10).page_range(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (0..7).collect();
        let p = Paginator::new(items.len(), 2, 3);
        assert_eq!(p.slice(&items), &[3, 4, 5]);
        let p = Paginator::new(items.len(), 3, 3);
        assert_eq!(p.slice(&items), &[6]);
    }
}
