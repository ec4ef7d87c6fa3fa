//! Fixed-size paging over an already filtered and sorted row list

use crate::core::PageSize;

/// One page of items plus the metadata needed to render controls
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective page index after clamping (0-based)
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Service for pagination
pub struct PaginationService;

impl PaginationService {
    /// `max(1, ceil(len / page_size))`
    pub fn total_pages(len: usize, page_size: PageSize) -> usize {
        len.div_ceil(page_size.get()).max(1)
    }

    /// Clamp a requested page index into `[0, total_pages - 1]`
    pub fn clamp_page(page: usize, len: usize, page_size: PageSize) -> usize {
        page.min(Self::total_pages(len, page_size) - 1)
    }

    /// Slice out the requested page. A stale page index past the end is
    /// clamped to the last page instead of producing an empty slice.
    pub fn paginate<T>(items: &[T], page: usize, page_size: PageSize) -> Page<'_, T> {
        let total_pages = Self::total_pages(items.len(), page_size);
        let page = page.min(total_pages - 1);
        let start = (page * page_size.get()).min(items.len());
        let end = (start + page_size.get()).min(items.len());

        Page {
            items: &items[start..end],
            page,
            total_pages,
        }
    }

    /// Every item on one page, used while the paging controls are hidden
    pub fn single_page<T>(items: &[T]) -> Page<'_, T> {
        Page {
            items,
            page: 0,
            total_pages: 1,
        }
    }
}
