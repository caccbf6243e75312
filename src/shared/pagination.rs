use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Listings are paged two posts at a time.
pub const POSTS_PER_PAGE: u64 = 2;

/// Raw `?page=` parameter. Kept as text so junk input can fall back to page 1
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-based). Missing or non-numeric means page 1.
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: POSTS_PER_PAGE,
        }
    }

    pub fn from_raw(raw: Option<&str>) -> Self {
        let page = raw.map(str::trim).map_or(1, |v| match v.parse::<i64>() {
            Ok(p) if p < 1 => 1,
            Ok(p) => p as u64,
            // Too large to represent: past any real last page, `resolve` clamps it
            Err(_) if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
            Err(_) => 1,
        });

        Self::new(page)
    }

    /// An empty result set still has one (empty) page.
    pub fn num_pages(&self, total: u64) -> u64 {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.per_page)
        }
    }

    /// Clamp to the last page that exists for `total` items.
    pub fn resolve(&self, total: u64) -> Self {
        Self {
            page: self.page.min(self.num_pages(total)),
            per_page: self.per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }
}

impl From<&PageQuery> for PageRequest {
    fn from(query: &PageQuery) -> Self {
        PageRequest::from_raw(query.page.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub num_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResult<T> {
    /// `resolved` must already be clamped with [`PageRequest::resolve`].
    pub fn new(items: Vec<T>, resolved: PageRequest, total: u64) -> Self {
        let num_pages = resolved.num_pages(total);
        Self {
            items,
            page: resolved.page,
            per_page: resolved.per_page,
            total,
            num_pages,
            has_next: resolved.page < num_pages,
            has_previous: resolved.page > 1,
        }
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            num_pages: self.num_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_defaults_to_first() {
        assert_eq!(PageRequest::from_raw(None).page, 1);
    }

    #[test]
    fn test_non_integer_page_defaults_to_first() {
        assert_eq!(PageRequest::from_raw(Some("abc")).page, 1);
        assert_eq!(PageRequest::from_raw(Some("1.5")).page, 1);
        assert_eq!(PageRequest::from_raw(Some("")).page, 1);
    }

    #[test]
    fn test_page_below_one_goes_to_first() {
        assert_eq!(PageRequest::from_raw(Some("0")).page, 1);
        assert_eq!(PageRequest::from_raw(Some("-4")).page, 1);
    }

    #[test]
    fn test_page_beyond_last_is_clamped() {
        // 5 items at 2 per page => 3 pages
        let resolved = PageRequest::from_raw(Some("99")).resolve(5);
        assert_eq!(resolved.page, 3);
        assert_eq!(resolved.offset(), 4);
    }

    #[test]
    fn test_overflowing_page_goes_to_last() {
        let resolved = PageRequest::from_raw(Some("99999999999999999999")).resolve(5);
        assert_eq!(resolved.page, 3);
        assert_eq!(resolved.offset(), 4);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let req = PageRequest::from_raw(Some("7"));
        assert_eq!(req.num_pages(0), 1);
        assert_eq!(req.resolve(0).page, 1);
        assert_eq!(req.resolve(0).offset(), 0);
    }

    #[test]
    fn test_page_result_flags() {
        let resolved = PageRequest::new(2).resolve(5);
        let page = PageResult::new(vec!["c", "d"], resolved, 5);

        assert_eq!(page.num_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);

        let last = PageResult::new(vec!["e"], PageRequest::new(3).resolve(5), 5);
        assert!(!last.has_next);
        assert_eq!(last.items.len(), 1);
    }

    #[test]
    fn test_map_keeps_paging_metadata() {
        let page = PageResult::new(vec![1, 2], PageRequest::new(1), 3).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 3);
        assert_eq!(page.num_pages, 2);
    }
}
