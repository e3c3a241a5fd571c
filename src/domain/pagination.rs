pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
pub const MAX_PAGE: i64 = 1_000_000;

/// A 1-based page window, clamped to sane bounds on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> ListResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let page = PageRequest::new(Some(0), Some(1000));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PER_PAGE);

        let page = PageRequest::new(Some(-3), Some(0));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn huge_page_numbers_are_capped() {
        let page = PageRequest::new(Some(i64::MAX), Some(100));
        assert_eq!(page.page, MAX_PAGE);
        assert_eq!(page.offset(), (MAX_PAGE - 1) * 100);
    }
}
