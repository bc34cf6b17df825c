use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::FieldErrors;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    /// Localized messages keyed by the offending field
    #[serde(
        rename = "fieldErrors",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            errors: None,
            field_errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
            field_errors: None,
        }
    }

    pub fn with_field_errors(mut self, field_errors: Option<FieldErrors>) -> Self {
        self.field_errors = field_errors;
        self
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Resolved page request: 1-indexed page and a clamped page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Normalize raw query values: missing page is 1, missing size is the default,
    /// page below 1 becomes 1 and the size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination block returned next to every listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: (total + request.page_size - 1) / request.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_request_clamps_out_of_range_values() {
        let request = PageRequest::new(Some(0), Some(10_000));
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, MAX_PAGE_SIZE);

        let request = PageRequest::new(Some(-3), Some(0));
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 1);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(Some(3), Some(6));
        assert_eq!(request.offset(), 12);
        assert_eq!(request.limit(), 6);
    }

    #[test]
    fn test_pagination_total_pages() {
        let request = PageRequest::new(Some(1), Some(6));
        assert_eq!(Pagination::new(request, 0).total_pages, 0);
        assert_eq!(Pagination::new(request, 6).total_pages, 1);
        assert_eq!(Pagination::new(request, 7).total_pages, 2);
        assert_eq!(Pagination::new(request, 12).total_pages, 2);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let pagination = Pagination::new(PageRequest::new(Some(2), Some(6)), 7);
        let value = serde_json::to_value(&pagination).unwrap();
        assert_eq!(value["pageSize"], 6);
        assert_eq!(value["totalPages"], 2);
    }
}
