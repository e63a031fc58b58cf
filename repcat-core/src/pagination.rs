//! Pagination indexer
//!
//! Slices the ordered result set and builds the compact page-label row
//! shown under the listing (`1 … 6 7 8 … 10`).

use std::fmt;

/// Viewport class; narrow screens get a smaller page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Wide,
    Narrow,
}

/// One entry of the page control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(usize),
    /// Separator, never a page target
    Ellipsis,
}

impl PageLabel {
    pub fn page(self) -> Option<usize> {
        match self {
            PageLabel::Page(n) => Some(n),
            PageLabel::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(n) => write!(f, "{}", n),
            PageLabel::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `total_items`; zero items means zero pages
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Snap a requested page into `[1, max(1, total_pages)]`
///
/// The indexer itself does not clamp; callers run this first.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.max(1).min(total_pages.max(1))
}

/// The items shown on `current_page` (1-based)
pub fn page_slice<T>(items: &[T], current_page: usize, page_size: usize) -> &[T] {
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Compact label sequence for the page control
/// - Up to 5 pages: every page
/// - Near the start: `1 2 3 4 5 … N`
/// - Near the end: `1 … N-4 N-3 N-2 N-1 N`
/// - Otherwise: `1 … c-1 c c+1 … N`
pub fn page_labels(current_page: usize, total_pages: usize) -> Vec<PageLabel> {
    use PageLabel::{Ellipsis, Page};

    if total_pages <= 5 {
        return (1..=total_pages).map(Page).collect();
    }

    if current_page <= 4 {
        let mut labels: Vec<PageLabel> = (1..=5).map(Page).collect();
        labels.push(Ellipsis);
        labels.push(Page(total_pages));
        return labels;
    }

    if current_page + 3 > total_pages {
        let mut labels = vec![Page(1), Ellipsis];
        labels.extend((total_pages - 4..=total_pages).map(Page));
        return labels;
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current_page - 1),
        Page(current_page),
        Page(current_page + 1),
        Ellipsis,
        Page(total_pages),
    ]
}
