//! Pagination over a ranked result list.
//!
//! Pure window math over slices; the page cursor itself lives on the
//! analysis session. Page numbers are 1-based throughout.

use serde::Serialize;

/// Products shown per page.
pub const PAGE_SIZE: usize = 4;

/// Upper bound on the numbered page buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// One page of a ranked list.
#[derive(Debug, Serialize)]
pub struct Page<'a, T> {
    /// Page number as requested; may lie outside the valid range.
    pub number: usize,
    pub total_pages: usize,
    pub items: &'a [T],
}

/// Number of pages for `len` items, 0 when the list is empty.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    debug_assert!(page_size > 0);
    len.div_ceil(page_size)
}

/// Cuts the `number`-th page out of `items`.
///
/// Out-of-range numbers (including 0) are tolerated and produce an empty
/// page, so a stale cursor renders as "no rows" rather than an error.
pub fn page<T>(items: &[T], page_size: usize, number: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    let start = number.saturating_sub(1).saturating_mul(page_size);
    let slice = if number == 0 || start >= items.len() {
        &items[0..0]
    } else {
        &items[start..(start + page_size).min(items.len())]
    };
    Page {
        number,
        total_pages: total,
        items: slice,
    }
}

/// Numbered page buttons to display.
///
/// A window of up to [`MAX_PAGE_BUTTONS`] numbers centered on `current`,
/// shifted as needed to stay contiguous inside `[1, total]`.
pub fn visible_page_numbers(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    // An unclamped cursor can sit past the last page; window from the last
    // page then, so start can never pass end below.
    let current = current.min(total);
    let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = (start + MAX_PAGE_BUTTONS - 1).min(total);
    if end - start + 1 < MAX_PAGE_BUTTONS {
        start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
    }
    (start..=end).collect()
}
