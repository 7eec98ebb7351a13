//! Page query used to pull one collection from the backend in pages.

use chrono::NaiveDate;

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: i64 = 1000;

/// Selects which rows of a collection to fetch and which page of them.
///
/// The rep and date filters mirror the backend's "all sales for rep X
/// between two dates" query. Both are optional; an empty query selects the
/// whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    pub rep_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            rep_id: None,
            from: None,
            to: None,
        }
    }
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of rows per page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Restricts rows to one rep.
    pub fn with_rep(mut self, rep_id: impl Into<String>) -> Self {
        self.rep_id = Some(rep_id.into());
        self
    }

    /// Restricts dated rows to `from..=to` (UTC calendar dates).
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Whether a row scoped to `rep_id` and `date` is selected.
    ///
    /// `None` on the row side means the row is not scoped on that axis and
    /// always passes it.
    pub fn selects(&self, rep_id: Option<&str>, date: Option<NaiveDate>) -> bool {
        if let (Some(wanted), Some(actual)) = (self.rep_id.as_deref(), rep_id) {
            if wanted != actual {
                return false;
            }
        }
        if let Some(date) = date {
            if self.from.is_some_and(|from| date < from) {
                return false;
            }
            if self.to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_default_query() {
        let q = PageQuery::new();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
        assert!(q.selects(Some("anyone"), Some(d(1999, 1, 1))));
    }

    #[test]
    fn test_rep_filter() {
        let q = PageQuery::new().with_rep("u1");
        assert!(q.selects(Some("u1"), None));
        assert!(!q.selects(Some("u2"), None));
        // Unscoped rows (e.g. the user roster) are never filtered by rep
        assert!(q.selects(None, None));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let q = PageQuery::new().with_date_range(d(2024, 1, 1), d(2024, 12, 31));
        assert!(q.selects(None, Some(d(2024, 1, 1))));
        assert!(q.selects(None, Some(d(2024, 12, 31))));
        assert!(!q.selects(None, Some(d(2023, 12, 31))));
        assert!(!q.selects(None, Some(d(2025, 1, 1))));
    }
}
