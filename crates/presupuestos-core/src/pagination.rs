//! Client-side pagination over an in-memory collection
//!
//! `Paginator` is a borrowing view: build a new one whenever the
//! collection changes. Navigation never fails; out-of-range requests are
//! ignored and sizes are clamped.

use serde::Serialize;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PageLink {
    /// A clickable page number
    Page(usize),
    /// Collapsed range
    Ellipsis,
}

/// Paginated view over a slice
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    current_page: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// Create a paginator on page 1; a zero page size is treated as 1
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Start on `page`, clamped into the valid range
    pub fn with_initial_page(mut self, page: usize) -> Self {
        self.current_page = page.clamp(1, self.total_pages().max(1));
        self
    }

    /// Items on the current page
    pub fn current_items(&self) -> &'a [T] {
        let start = ((self.current_page - 1) * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// `ceil(total_items / page_size)`, 0 for an empty collection
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// 1-based position of the first item shown, 0 when empty
    pub fn start_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item shown, never past `total_items`
    pub fn end_index(&self) -> usize {
        (self.current_page * self.page_size).min(self.items.len())
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Jump to `page`; ignored outside `1..=total_pages`
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        }
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        }
    }

    /// Change the page size and return to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Page numbers to render, collapsing long ranges into ellipses
    pub fn page_window(&self, max_visible: usize) -> Vec<PageLink> {
        // the collapsed layouts below need room for at least five entries
        let max_visible = max_visible.max(5);
        let total = self.total_pages();
        let current = self.current_page;

        if total <= max_visible {
            return (1..=total).map(PageLink::Page).collect();
        }

        let mut links = Vec::with_capacity(7);
        if current <= 3 {
            links.extend((1..=4).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        } else if current >= total - 2 {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((total - 3..=total).map(PageLink::Page));
        } else {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((current - 1..=current + 1).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        }
        links
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_twenty_five_items_by_ten() {
        let data = items(25);
        let mut p = Paginator::new(&data, 10);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.current_items(), &data[0..10]);
        assert_eq!((p.start_index(), p.end_index()), (1, 10));

        p.go_to_page(3);
        assert_eq!(p.current_items(), &data[20..25]);
        assert_eq!((p.start_index(), p.end_index()), (21, 25));
        assert!(!p.has_next_page());
        assert!(p.has_previous_page());
    }

    #[test]
    fn test_pages_reconstruct_collection() {
        for n in 0..40 {
            let data = items(n);
            for size in 1..12 {
                let mut p = Paginator::new(&data, size);
                assert_eq!(p.total_pages(), n.div_ceil(size));

                let mut joined = Vec::new();
                for page in 1..=p.total_pages() {
                    p.go_to_page(page);
                    joined.extend_from_slice(p.current_items());
                }
                assert_eq!(joined, data, "n={} size={}", n, size);
            }
        }
    }

    #[test]
    fn test_go_to_page_out_of_range_is_ignored() {
        let data = items(25);
        let mut p = Paginator::new(&data, 10);
        p.go_to_page(2);
        p.go_to_page(0);
        assert_eq!(p.current_page(), 2);
        p.go_to_page(4);
        assert_eq!(p.current_page(), 2);
        p.go_to_page(usize::MAX);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_next_previous_stop_at_boundaries() {
        let data = items(12);
        let mut p = Paginator::new(&data, 5);
        p.previous_page();
        assert_eq!(p.current_page(), 1);
        p.next_page();
        p.next_page();
        p.next_page();
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.current_items(), &data[10..12]);
        p.previous_page();
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let data = items(60);
        let mut p = Paginator::new(&data, 10);
        p.go_to_page(5);
        p.set_page_size(25);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.total_pages(), 3);

        p.go_to_page(2);
        p.set_page_size(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let data: Vec<usize> = Vec::new();
        let mut p = Paginator::new(&data, 10);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.current_page(), 1);
        assert!(p.current_items().is_empty());
        assert_eq!((p.start_index(), p.end_index()), (0, 0));
        assert!(!p.has_next_page());
        assert!(!p.has_previous_page());
        p.go_to_page(1);
        p.next_page();
        assert_eq!(p.current_page(), 1);
        assert!(p.page_window(5).is_empty());
    }

    #[test]
    fn test_initial_page_is_clamped() {
        let data = items(25);
        assert_eq!(Paginator::new(&data, 10).with_initial_page(2).current_page(), 2);
        assert_eq!(Paginator::new(&data, 10).with_initial_page(9).current_page(), 3);
        assert_eq!(Paginator::new(&data, 10).with_initial_page(0).current_page(), 1);
        let empty: Vec<usize> = Vec::new();
        assert_eq!(Paginator::new(&empty, 10).with_initial_page(3).current_page(), 1);
    }

    #[test]
    fn test_page_window_small_total() {
        let data = items(50);
        let p = Paginator::new(&data, 10);
        assert_eq!(p.page_window(5), (1..=5).map(PageLink::Page).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_window_shapes() {
        use PageLink::{Ellipsis, Page};
        let data = items(100);

        let p = Paginator::new(&data, 10).with_initial_page(2);
        assert_eq!(p.page_window(5), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]);

        let p = Paginator::new(&data, 10).with_initial_page(5);
        assert_eq!(
            p.page_window(5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );

        let p = Paginator::new(&data, 10).with_initial_page(9);
        assert_eq!(p.page_window(5), vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]);
    }
}
