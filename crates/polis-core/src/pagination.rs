//! Page requests and result slices.
//!
//! Listing endpoints never count the full result set. Instead a backend
//! fetches one row more than the requested page size and reports whether
//! that extra row existed:
//!
//! ```ignore
//! use polis_core::pagination::{PageRequest, Slice};
//!
//! let page = PageRequest::new(0, 2);
//! let rows = vec![1, 2, 3]; // fetched with LIMIT page.fetch_limit()
//! let slice = Slice::from_overfetch(rows, page);
//!
//! assert_eq!(slice.content, vec![1, 2]);
//! assert!(slice.has_next);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when a listing is requested without a search criterion.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A validated, zero-indexed page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request. A zero `size` is raised to one.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    #[must_use]
    pub fn first() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Rows to fetch so that `has_next` can be derived without a count.
    #[must_use]
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.size) + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results plus whether further pages exist.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "content": [...],
///   "pageNumber": 0,
///   "pageSize": 20,
///   "hasNext": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// Builds a slice from at most `page.fetch_limit()` rows.
    pub fn from_overfetch(mut rows: Vec<T>, page: PageRequest) -> Self {
        let size = page.size() as usize;
        let has_next = rows.len() > size;
        rows.truncate(size);
        Self {
            content: rows,
            page_number: page.page(),
            page_size: page.size(),
            has_next,
        }
    }

    pub fn empty(page: PageRequest) -> Self {
        Self::from_overfetch(Vec::new(), page)
    }

    pub fn map<U, F>(self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            has_next: self.has_next,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One sort criterion as sent by the clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sorting {
    pub field: String,
    pub direction: SortDirection,
}

/// Paging block of a filter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page_number: i64,
    #[serde(default)]
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sorting>>,
}

impl Pagination {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            sort: None,
        }
    }

    pub fn has_sort(&self) -> bool {
        self.sort.as_ref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default_is_first_page() {
        let page = PageRequest::default();
        assert_eq!(page.page(), 0);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.fetch_limit(), 21);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(3, 15);
        assert_eq!(page.offset(), 45);
    }

    #[test]
    fn test_page_request_zero_size_is_raised() {
        assert_eq!(PageRequest::new(0, 0).size(), 1);
    }

    #[test]
    fn test_slice_from_exact_page_has_no_next() {
        let slice = Slice::from_overfetch(vec![1, 2, 3], PageRequest::new(0, 3));
        assert_eq!(slice.content, vec![1, 2, 3]);
        assert!(!slice.has_next);
    }

    #[test]
    fn test_slice_from_overfetch_trims_extra_row() {
        let slice = Slice::from_overfetch(vec![1, 2, 3, 4], PageRequest::new(1, 3));
        assert_eq!(slice.content, vec![1, 2, 3]);
        assert_eq!(slice.page_number, 1);
        assert!(slice.has_next);
    }

    #[test]
    fn test_empty_slice() {
        let slice: Slice<i32> = Slice::empty(PageRequest::first());
        assert!(slice.is_empty());
        assert!(!slice.has_next);
        assert_eq!(slice.page_size, 20);
    }

    #[test]
    fn test_slice_map_keeps_position() {
        let slice = Slice::from_overfetch(vec![1, 2, 3], PageRequest::new(2, 2)).map(|n| n * 10);
        assert_eq!(slice.content, vec![10, 20]);
        assert_eq!(slice.page_number, 2);
        assert!(slice.has_next);
    }

    #[test]
    fn test_slice_serialization() {
        let slice = Slice::from_overfetch(vec!["a"], PageRequest::first());
        let json = serde_json::to_value(&slice).unwrap();
        assert_eq!(json["content"][0], "a");
        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["hasNext"], false);
    }

    #[test]
    fn test_pagination_deserialization() {
        let json = r#"{"pageNumber": 1, "pageSize": 5, "sort": [{"field": "title", "direction": "DESC"}]}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.page_number, 1);
        assert_eq!(p.page_size, 5);
        assert!(p.has_sort());
        assert_eq!(p.sort.unwrap()[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_pagination_empty_sort_is_not_sorting() {
        let p: Pagination = serde_json::from_str(r#"{"pageNumber": 0, "pageSize": 5, "sort": []}"#).unwrap();
        assert!(!p.has_sort());
    }
}
