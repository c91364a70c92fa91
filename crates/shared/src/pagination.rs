//! Page-based pagination helpers.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i32 = 50;

/// Maximum page size for list endpoints.
pub const MAX_PER_PAGE: i32 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PageParams {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

impl PageParams {
    /// Effective page number (1-based).
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `[1, MAX_PER_PAGE]`.
    pub fn per_page(&self) -> i32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// SQL offset for the effective page.
    pub fn offset(&self) -> i64 {
        ((self.page() - 1) * self.per_page()) as i64
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    pub page: i32,
    pub per_page: i32,
    pub total: i64,
    pub total_pages: i32,
}

impl Pagination {
    /// Builds pagination metadata from the effective params and a total count.
    pub fn new(params: &PageParams, total: i64) -> Self {
        let per_page = params.per_page();
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i32;
        Self {
            page: params.page(),
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let params = PageParams {
            page: Some(0),
            per_page: None,
        };
        assert_eq!(params.page(), 1);

        let params = PageParams {
            page: Some(-5),
            per_page: None,
        };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_per_page_clamped() {
        let params = PageParams {
            page: None,
            per_page: Some(500),
        };
        assert_eq!(params.per_page(), MAX_PER_PAGE);

        let params = PageParams {
            page: None,
            per_page: Some(0),
        };
        assert_eq!(params.per_page(), 1);
    }

    #[test]
    fn test_offset() {
        let params = PageParams {
            page: Some(3),
            per_page: Some(20),
        };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_pagination_total_pages() {
        let params = PageParams {
            page: Some(1),
            per_page: Some(10),
        };
        assert_eq!(Pagination::new(&params, 0).total_pages, 0);
        assert_eq!(Pagination::new(&params, 10).total_pages, 1);
        assert_eq!(Pagination::new(&params, 11).total_pages, 2);
        assert_eq!(Pagination::new(&params, 95).total_pages, 10);
    }

    #[test]
    fn test_query_deserialization() {
        let params: PageParams = serde_json::from_str(r#"{"page":2,"per_page":25}"#).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.per_page(), 25);
    }
}
