use serde::Serialize;

/// One page of a collection
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_items: Vec<T>,
    pub total_pages: usize,
}

/// Number of pages needed for `total_items`; zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slices out page `page` (1-based) of `items`.
///
/// Callers clamp `page` into `1..=total_pages` first (see [`clamp_page`]).
/// An out-of-range page yields an empty slice rather than a panic, and an
/// empty collection has zero pages, which callers render as an empty page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        page_items: items[start..end].to_vec(),
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Pulls a requested page number into the valid range, treating "no pages"
/// as page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
