//! Free-text filter requests.
//!
//! A filter request is resolved into a [`FilterQuery`] before it reaches a
//! repository. An empty criterion lists the first page with the default size
//! and ignores the requested paging. A non-empty criterion is a
//! case-sensitive substring search over the requested page.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::pagination::{PageRequest, Pagination, Sorting};
use crate::status::ServerError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SimpleStringFilterDto {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// Accepted for compatibility with older clients; any entry is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Vec<Sorting>>,
}

impl SimpleStringFilterDto {
    pub fn new(filter: impl Into<String>, page_number: i64, page_size: i64) -> Self {
        Self {
            filter: Some(filter.into()),
            pagination: Some(Pagination::new(page_number, page_size)),
            sorting: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterQuery<'a> {
    All(PageRequest),
    Matching(&'a str, PageRequest),
}

impl FilterQuery<'_> {
    pub fn page(&self) -> PageRequest {
        match self {
            Self::All(page) | Self::Matching(_, page) => *page,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter is null")]
    Missing,
    #[error("Filter has no pagination info")]
    MissingPagination,
    #[error("Page number must not be negative, got {0}")]
    InvalidPage(i64),
    #[error("Page size must be positive, got {0}")]
    InvalidSize(i64),
    #[error("Sorting is not implemented")]
    SortUnsupported,
}

impl FilterError {
    pub fn status_kind(&self) -> ServerError {
        match self {
            Self::SortUnsupported => ServerError::SortNotSupported,
            _ => ServerError::FilterMissing,
        }
    }
}

/// Resolves a filter request into the query a repository should run.
pub fn resolve(dto: Option<&SimpleStringFilterDto>) -> Result<FilterQuery<'_>, FilterError> {
    let dto = dto.ok_or(FilterError::Missing)?;
    let pagination = dto.pagination.as_ref().ok_or(FilterError::MissingPagination)?;

    if pagination.has_sort() || dto.sorting.as_ref().is_some_and(|s| !s.is_empty()) {
        return Err(FilterError::SortUnsupported);
    }

    match dto.filter.as_deref() {
        None | Some("") => Ok(FilterQuery::All(PageRequest::first())),
        Some(criterion) => {
            let page = u32::try_from(pagination.page_number)
                .map_err(|_| FilterError::InvalidPage(pagination.page_number))?;
            let size = u32::try_from(pagination.page_size)
                .ok()
                .filter(|s| *s > 0)
                .ok_or(FilterError::InvalidSize(pagination.page_size))?;
            Ok(FilterQuery::Matching(criterion, PageRequest::new(page, size)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::SortDirection;

    #[test]
    fn test_absent_filter_is_missing() {
        let err = resolve(None).unwrap_err();
        assert_eq!(err, FilterError::Missing);
        assert_eq!(err.status_kind(), ServerError::FilterMissing);
    }

    #[test]
    fn test_missing_pagination() {
        let dto = SimpleStringFilterDto {
            filter: Some("math".into()),
            ..Default::default()
        };
        assert_eq!(resolve(Some(&dto)).unwrap_err(), FilterError::MissingPagination);
    }

    #[test]
    fn test_empty_criterion_uses_default_first_page() {
        let dto = SimpleStringFilterDto::new("", 4, 3);
        assert_eq!(resolve(Some(&dto)).unwrap(), FilterQuery::All(PageRequest::first()));

        let dto = SimpleStringFilterDto {
            filter: None,
            pagination: Some(Pagination::new(2, 7)),
            sorting: None,
        };
        assert_eq!(resolve(Some(&dto)).unwrap(), FilterQuery::All(PageRequest::new(0, 20)));
    }

    #[test]
    fn test_criterion_uses_requested_page() {
        let dto = SimpleStringFilterDto::new("math", 2, 5);
        let query = resolve(Some(&dto)).unwrap();
        assert_eq!(query, FilterQuery::Matching("math", PageRequest::new(2, 5)));
        assert_eq!(query.page().offset(), 10);
    }

    #[test]
    fn test_invalid_paging_is_rejected() {
        let dto = SimpleStringFilterDto::new("x", -1, 5);
        assert_eq!(resolve(Some(&dto)).unwrap_err(), FilterError::InvalidPage(-1));

        let dto = SimpleStringFilterDto::new("x", 0, 0);
        let err = resolve(Some(&dto)).unwrap_err();
        assert_eq!(err, FilterError::InvalidSize(0));
        assert_eq!(err.status_kind(), ServerError::FilterMissing);
    }

    #[test]
    fn test_sort_is_rejected_explicitly() {
        let mut dto = SimpleStringFilterDto::new("", 0, 20);
        if let Some(p) = dto.pagination.as_mut() {
            p.sort = Some(vec![Sorting {
                field: "code".into(),
                direction: SortDirection::Asc,
            }]);
        }
        let err = resolve(Some(&dto)).unwrap_err();
        assert_eq!(err, FilterError::SortUnsupported);
        assert_eq!(err.status_kind(), ServerError::SortNotSupported);
    }

    #[test]
    fn test_deserializes_client_payload() {
        let json = r#"{"filter":"ann","pagination":{"pageNumber":0,"pageSize":10}}"#;
        let dto: SimpleStringFilterDto = serde_json::from_str(json).unwrap();
        assert_eq!(
            resolve(Some(&dto)).unwrap(),
            FilterQuery::Matching("ann", PageRequest::new(0, 10))
        );
    }
}
