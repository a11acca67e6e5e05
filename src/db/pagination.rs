//! Page-based pagination results.

/// One page of items plus the total count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl<T> PaginatedResult<T> {
    /// Clamp a requested page/per_page pair and return `(page, per_page, offset)`.
    ///
    /// Page numbers start at 1; 0 is treated as 1.
    pub fn window(page: u32, per_page: u32) -> (u32, u32, i64) {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = (i64::from(page) - 1) * i64::from(per_page);
        (page, per_page, offset)
    }

    /// Total number of pages (at least 1).
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 1;
        }
        let per_page = i64::from(self.per_page.max(1));
        ((self.total + per_page - 1) / per_page) as u32
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Map the items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}
