//! Pagination footer: previous/next links, a window of page buttons and a
//! page-size selector.

use serde::Serialize;

use crate::listing::query::PageQuery;

/// Most page buttons shown at once.
pub const MAX_VISIBLE_PAGES: u32 = 5;

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// One-based page numbers to render, centered on `current_page` (zero-based)
/// and clamped to `1..=total_pages`.
pub fn page_window(total_pages: u32, current_page: u32, max_visible: u32) -> Vec<u32> {
    if total_pages == 0 || max_visible == 0 {
        return vec![];
    }

    let visible = max_visible.min(total_pages);
    let current = current_page.min(total_pages - 1) + 1;

    let mut start = current.saturating_sub(visible / 2).max(1);
    let mut end = start + visible - 1;
    if end > total_pages {
        end = total_pages;
        start = end + 1 - visible;
    }

    (start..=end).collect()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// One-based label.
    pub number: u32,
    pub href: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageSizeOption {
    pub size: u32,
    pub href: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationFooter {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
    pub page_sizes: Vec<PageSizeOption>,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl PaginationFooter {
    /// Builds the footer for `query`, or `None` when everything fits on one
    /// page. `href` turns a query into a link.
    pub fn build<F>(
        query: &PageQuery,
        total_pages: u32,
        total_elements: u64,
        page_size_options: &[u32],
        href: F,
    ) -> Option<Self>
    where
        F: Fn(&PageQuery) -> String,
    {
        if total_pages <= 1 {
            return None;
        }

        let current = query.page.min(total_pages - 1);

        let pages = page_window(total_pages, current, MAX_VISIBLE_PAGES)
            .into_iter()
            .map(|number| PageLink {
                number,
                href: href(&query.with_page(number - 1)),
                active: number - 1 == current,
            })
            .collect();

        let page_sizes = page_size_options
            .iter()
            .map(|&size| PageSizeOption {
                size,
                href: href(&PageQuery {
                    page: 0,
                    size,
                    ..query.clone()
                }),
                selected: size == query.size,
            })
            .collect();

        Some(Self {
            previous: (current > 0).then(|| href(&query.with_page(current - 1))),
            next: (current + 1 < total_pages).then(|| href(&query.with_page(current + 1))),
            pages,
            page_sizes,
            total_pages,
            total_elements,
        })
    }
}
