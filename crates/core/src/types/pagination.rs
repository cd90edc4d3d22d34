//! Page-based pagination as spoken by the products backend.

use serde::{Deserialize, Serialize};

/// Pagination block returned alongside a page of items.
///
/// Every field is optional on the wire; missing values fall back to a
/// single page so a bare `{"items": [...]}` response still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size used by the backend.
    pub limit: u32,
    /// Total number of matching items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PageRequest::DEFAULT_LIMIT,
            total: 0,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Whether a page exists before the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a page exists after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A requested page, normalised to sane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl PageRequest {
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest page size the panel will ask for.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page request, clamping page to at least 1 and limit to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 20);
    }

    #[test]
    fn test_page_request_clamps() {
        let req = PageRequest::new(Some(0), Some(10_000));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, PageRequest::MAX_LIMIT);
        let req = PageRequest::new(Some(2), Some(0));
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn test_pagination_from_camel_case() {
        let p: Pagination =
            serde_json::from_str(r#"{"page":2,"limit":20,"total":45,"totalPages":3}"#).unwrap();
        assert_eq!(p.total_pages, 3);
        assert!(p.has_previous());
        assert!(p.has_next());
    }

    #[test]
    fn test_pagination_missing_fields() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Pagination::default());
        assert!(!p.has_previous());
        assert!(!p.has_next());
    }
}
