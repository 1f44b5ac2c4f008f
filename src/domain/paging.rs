//! Paging parameters

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::sort::SortDirective;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_COLUMN: &str = "Id";
pub const DEFAULT_SORT_ORDER: &str = "DESC";

/// Anything that can describe which page of a source to return.
pub trait PagingParams {
    /// 1-based page number
    fn page_number(&self) -> u32;

    fn page_size(&self) -> u32;

    /// Requested sort column. `None` or blank means unset.
    fn sort_column(&self) -> Option<&str>;

    /// Requested sort order, compared case-insensitively against `"ASC"`.
    fn sort_order(&self) -> Option<&str>;

    fn sort_directive(&self, default_column: &str) -> SortDirective {
        SortDirective::build(self.sort_column(), self.sort_order(), default_column)
    }
}

/// Paging parameters for list requests
///
/// Deserializes from a query string such as
/// `?page_number=2&page_size=25&sort_column=Name&sort_order=asc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page_number")]
    #[validate(range(min = 1))]
    pub page_number: u32,
    /// Items per page. Default: 10
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub page_size: u32,
    /// Column to sort by. Defaults to the paginator's default column
    #[serde(default)]
    #[validate(length(max = 128))]
    pub sort_column: Option<String>,
    /// `ASC` or `DESC` (case-insensitive). Anything but `ASC` sorts descending
    #[serde(default)]
    pub sort_order: Option<String>,
}

fn default_page_number() -> u32 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
            sort_column: None,
            sort_order: None,
        }
    }

    pub fn sorted_by(mut self, column: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_column = Some(column.into());
        self.sort_order = Some(order.into());
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
            .sorted_by(DEFAULT_SORT_COLUMN, DEFAULT_SORT_ORDER)
    }
}

impl PagingParams for PageRequest {
    fn page_number(&self) -> u32 {
        self.page_number
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    fn sort_order(&self) -> Option<&str> {
        self.sort_order.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.page_number, 1);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort_column, None);
        assert_eq!(request.sort_directive(DEFAULT_SORT_COLUMN).to_string(), "Id DESC");
    }

    #[test]
    fn test_default_matches_discrete_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page_number(), DEFAULT_PAGE_NUMBER);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort_directive("Other").to_string(), "Id DESC");
    }

    #[test]
    fn test_validation_rejects_zero() {
        assert!(PageRequest::new(1, 10).validate().is_ok());
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(1, 0).validate().is_err());
    }

    #[test]
    fn test_directive_from_request() {
        let request = PageRequest::new(2, 5).sorted_by("Name", "asc");
        assert_eq!(request.sort_directive("Id").to_string(), "Name ASC");
    }
}
