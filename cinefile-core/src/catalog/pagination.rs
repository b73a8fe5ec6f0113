//! Page navigation over a listing

use std::fmt;

use super::models::MoviePage;
use super::query::MAX_PAGE;

/// Where a listing is and how far it can go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl PageInfo {
    /// Reported totals are clamped to what the provider will actually serve.
    /// The served page is kept as is, even past the last page.
    pub fn new(page: u32, total_pages: u32, total_results: u64) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.clamp(1, MAX_PAGE),
            total_results,
        }
    }

    pub fn from_page(page: &MoviePage) -> Self {
        Self::new(page.page, page.total_pages, page.total_results)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Past the end, the way back is the last page
    pub fn previous(&self) -> Option<u32> {
        self.has_previous()
            .then(|| (self.page - 1).min(self.total_pages))
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Validate "go to page" input; only whole pages within range are accepted
    pub fn parse_go_to(&self, input: &str) -> Option<u32> {
        input
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|page| self.contains(*page))
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_are_clamped() {
        let info = PageInfo::new(3, 38_000, 760_000);
        assert_eq!(info.total_pages, 500);
        assert_eq!(info.to_string(), "Page 3 of 500");

        let empty = PageInfo::new(1, 0, 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_previous_and_next() {
        let first = PageInfo::new(1, 3, 60);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = PageInfo::new(3, 3, 60);
        assert_eq!(last.previous(), Some(2));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_page_past_end_is_kept() {
        let info = PageInfo::new(20, 10, 200);
        assert_eq!(info.page, 20);
        assert_eq!(info.total_pages, 10);
        assert!(!info.contains(info.page));
        assert_eq!(info.next(), None);
        assert_eq!(info.previous(), Some(10));
        assert_eq!(info.to_string(), "Page 20 of 10");

        assert_eq!(PageInfo::new(0, 10, 200).page, 1);
    }

    #[test]
    fn test_parse_go_to() {
        let info = PageInfo::new(1, 10, 200);
        assert_eq!(info.parse_go_to(" 7 "), Some(7));
        assert_eq!(info.parse_go_to("10"), Some(10));
        assert_eq!(info.parse_go_to("11"), None);
        assert_eq!(info.parse_go_to("0"), None);
        assert_eq!(info.parse_go_to("-2"), None);
        assert_eq!(info.parse_go_to("two"), None);
    }
}
