use crate::core::types::{Page, PathEntry};

/// Number of pages needed for `total` items; `page_size` must be non-zero
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Clamp a 1-indexed, possibly out-of-range page number into `[1, total_pages]`
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    if page < 1 || total_pages == 0 {
        return 1;
    }
    (page as u64).min(total_pages as u64) as usize
}

/// Slice one page out of `items`. Never fails: out-of-range page numbers
/// clamp, and a zero page size is treated as one.
pub fn paginate(items: &[PathEntry], page: i64, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        page,
        page_size,
        total,
        total_pages,
        items: items[start..end].to_vec(),
    }
}
