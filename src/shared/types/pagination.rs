//! Pagination primitives shared between repositories and the view layer.

/// A page request as it reaches the repositories: zero-based page index
/// plus page size.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

/// Paginated result wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Current page, 1-based
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit.max(1) as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(Vec::new(), 0, page, limit)
    }
}

/// One page button of the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    /// 1-based page number the button navigates to
    pub number: u32,
    /// Whether this is the page currently shown
    pub current: bool,
}

/// View-model describing which page buttons to render for a paginated
/// result set. A sliding window of at most `buttons_to_show` buttons is
/// kept centered on the current page and clamped to the valid range.
#[derive(Debug, Clone)]
pub struct Pager {
    pub total_pages: u32,
    /// Current page, 1-based
    pub current: u32,
    pub buttons: Vec<PageButton>,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev: u32,
    pub next: u32,
}

impl Pager {
    /// `current_index` is the zero-based page index of the result page.
    pub fn new(total_pages: u32, current_index: u32, buttons_to_show: u32) -> Self {
        let total = total_pages.max(1);
        let window = buttons_to_show.max(1).min(total);
        let current = current_index.saturating_add(1).min(total);

        let mut start = current.saturating_sub(window / 2).max(1);
        let end = (start + window - 1).min(total);
        start = end.saturating_sub(window - 1).max(1);

        let buttons = (start..=end)
            .map(|number| PageButton {
                number,
                current: number == current,
            })
            .collect();

        Self {
            total_pages: total,
            current,
            buttons,
            has_prev: current > 1,
            has_next: current < total,
            prev: current.saturating_sub(1).max(1),
            next: (current + 1).min(total),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
