//! Page arithmetic shared by every list view.
//!
//! List handlers accept a raw `page` query value and turn it into the
//! `limit`/`offset` pair sent to the backend, then build a [`Pagination`]
//! view from the total count the backend returns.

use serde::Serialize;

/// Page links shown on each side of the current page.
pub const PAGE_WINDOW: u32 = 5;

/// Resolved page window for a list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number actually used
    pub page: u32,

    /// Rows per page
    pub limit: u32,

    /// Rows skipped before this page
    pub offset: u32,
}

impl PageRequest {
    /// Resolve a page number into a limit/offset window.
    ///
    /// Pages `<= 0` are treated as page 1 (offset 0). For page `N > 0` the
    /// offset is `per_page * (N - 1)`.
    pub fn new(page: i64, per_page: u32) -> Self {
        let page = if page <= 0 {
            1
        } else {
            u32::try_from(page).unwrap_or(u32::MAX)
        };

        Self {
            page,
            limit: per_page,
            offset: per_page.saturating_mul(page - 1),
        }
    }

    /// Parse the raw `page` query value.
    ///
    /// Missing values mean page 1. Malformed values are logged and ignored.
    pub fn from_query(raw: Option<&str>, per_page: u32) -> Self {
        let page = match raw.map(str::trim).filter(|v| !v.is_empty()) {
            None => 1,
            Some(value) => value.parse::<i64>().unwrap_or_else(|e| {
                tracing::warn!(page = value, error = %e, "ignoring malformed page parameter");
                1
            }),
        };

        Self::new(page, per_page)
    }
}

/// Pagination block rendered under list tables.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,

    /// Page links: first, last, and [`PAGE_WINDOW`] pages either side of
    /// the current one, ascending. A step larger than one is a gap.
    pub pages: Vec<u32>,

    /// Active filters encoded as a query string (without `page`), so page
    /// links keep the current search.
    pub query: String,
}

impl Pagination {
    pub fn new(request: PageRequest, total_count: u64, query: String) -> Self {
        let per_page = u64::from(request.limit.max(1));
        let total_pages = u32::try_from(total_count.div_ceil(per_page)).unwrap_or(u32::MAX);
        let current_page = request.page;

        Self {
            current_page,
            per_page: request.limit,
            total_count,
            total_pages,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
            pages: page_links(current_page, total_pages),
            query,
        }
    }
}

/// Page numbers to link, bounded by the window rather than the total.
fn page_links(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current.min(total_pages);
    let start = current.saturating_sub(PAGE_WINDOW).max(1);
    let end = current.saturating_add(PAGE_WINDOW).min(total_pages);

    let mut pages = Vec::with_capacity((end - start) as usize + 3);
    if start > 1 {
        pages.push(1);
    }
    pages.extend(start..=end);
    if end < total_pages {
        pages.push(total_pages);
    }
    pages
}

/// Encode active filter values into a query string, skipping empty ones.
pub fn filter_query(params: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        if !value.is_empty() {
            serializer.append_pair(name, value);
        }
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pages_resolve_to_first_page() {
        for page in [-5, -1, 0] {
            let request = PageRequest::new(page, 20);
            assert_eq!(request.page, 1);
            assert_eq!(request.offset, 0);
            assert_eq!(request.limit, 20);
        }
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(1, 20).offset, 0);
        assert_eq!(PageRequest::new(2, 20).offset, 20);
        assert_eq!(PageRequest::new(7, 15).offset, 90);
    }

    #[test]
    fn malformed_page_falls_back_to_first_page() {
        assert_eq!(PageRequest::from_query(Some("abc"), 10).page, 1);
        assert_eq!(PageRequest::from_query(Some(""), 10).page, 1);
        assert_eq!(PageRequest::from_query(None, 10).page, 1);
        assert_eq!(PageRequest::from_query(Some(" 3 "), 10).offset, 20);
    }

    #[test]
    fn pagination_reflects_total_count() {
        let pagination = Pagination::new(PageRequest::new(2, 20), 45, "status=accepted".into());
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.prev_page, Some(1));
        assert_eq!(pagination.next_page, Some(3));
        assert_eq!(pagination.pages, vec![1, 2, 3]);

        let last = Pagination::new(PageRequest::new(3, 20), 45, String::new());
        assert_eq!(last.next_page, None);

        let empty = Pagination::new(PageRequest::new(1, 20), 0, String::new());
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.next_page, None);
    }

    #[test]
    fn page_links_stay_bounded_for_huge_totals() {
        let first = Pagination::new(PageRequest::new(1, 1), 30_000_000, String::new());
        assert_eq!(first.total_pages, 30_000_000);
        assert_eq!(first.pages, vec![1, 2, 3, 4, 5, 6, 30_000_000]);

        let middle = Pagination::new(PageRequest::new(500, 1), 30_000_000, String::new());
        assert_eq!(middle.pages.len(), 13);
        assert_eq!(middle.pages.first(), Some(&1));
        assert_eq!(middle.pages[1], 495);
        assert_eq!(middle.pages[11], 505);
        assert_eq!(middle.pages.last(), Some(&30_000_000));

        let beyond = Pagination::new(PageRequest::new(i64::MAX, 1), u64::MAX, String::new());
        assert!(beyond.pages.len() <= 13);
    }

    #[test]
    fn filter_query_skips_empty_values() {
        let query = filter_query(&[("search-term", "Acme Corp"), ("status", ""), ("sort", "asc")]);
        assert_eq!(query, "search-term=Acme+Corp&sort=asc");
    }
}
