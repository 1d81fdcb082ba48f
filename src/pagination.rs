use serde::Serialize;

/// Page requested when the caller passes a non-positive page number.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller passes a non-positive page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Window into a paginated result set.
///
/// Computed by [`paginate`] from the raw (possibly out-of-range) page inputs
/// and the total row count. `skip`/`take` translate directly to SQL
/// OFFSET/LIMIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u64,
    pub page_size: u64,
    pub skip: u64,
    pub take: u64,
    pub total_pages: u64,
}

/// Normalize page inputs and compute the query window.
///
/// Invalid inputs are coerced, never rejected: a page number `<= 0` becomes
/// page 1 and a page size `<= 0` becomes [`DEFAULT_PAGE_SIZE`]. A total of 0
/// yields 0 pages.
#[must_use]
pub fn paginate(page_number: i64, page_size: i64, total_items: u64) -> PageWindow {
    let current_page = if page_number <= 0 {
        DEFAULT_PAGE
    } else {
        page_number as u64
    };
    let page_size = if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size as u64
    };

    PageWindow {
        current_page,
        page_size,
        skip: (current_page - 1) * page_size,
        take: page_size,
        total_pages: total_items.div_ceil(page_size),
    }
}

/// One page of projected rows plus pagination metadata.
///
/// Derived per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationView<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

impl<T> PaginationView<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total_items: u64, window: PageWindow) -> Self {
        Self {
            items,
            total_items,
            page_size: window.page_size,
            current_page: window.current_page,
            total_pages: window.total_pages,
        }
    }
}
