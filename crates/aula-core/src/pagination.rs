//! List-query parameters and the paginated response envelope.
//!
//! Every collection endpoint accepts the same query parameters (`page`,
//! `per_page`, `search`, `sort_by`, `sort_dir`) and answers with the same
//! envelope (`data`, `total`, `per_page`, `current_page`, `last_page`).
//! Centralizing both here keeps the per-resource controllers free of
//! copy-pasted parameter handling.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Query parameters accepted by every collection endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive substring search over the resource's searchable columns
    pub search: Option<String>,
    /// Column to sort by; must be one of the resource's sortable columns
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDir>,
}

/// A `sort_by` value outside the resource's whitelist.
#[derive(Debug, thiserror::Error)]
#[error("cannot sort by '{0}'")]
pub struct InvalidSort(pub String);

impl ListQuery {
    /// Page number, defaulting to 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, defaulting to 10 and clamped between 1 and 100.
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(10).clamp(1, 100)
    }

    /// Row offset derived from page and page size.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    /// The search term, if present and non-empty after trimming.
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Resolve the sort pair against a resource's whitelisted columns.
    ///
    /// Returns `Ok(None)` when no `sort_by` was given; the caller applies its
    /// default ordering in that case.
    pub fn sort(&self, allowed: &[&str]) -> Result<Option<(&str, SortDir)>, InvalidSort> {
        match self.sort_by.as_deref() {
            None => Ok(None),
            Some(col) if allowed.contains(&col) => {
                Ok(Some((col, self.sort_dir.unwrap_or(SortDir::Asc))))
            }
            Some(col) => Err(InvalidSort(col.to_string())),
        }
    }
}

/// The paginated envelope returned by collection endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl<T> Paginated<T> {
    /// Wrap a page of rows. `last_page` is `ceil(total / per_page)`, never
    /// below 1 so an empty collection still reports one (empty) page.
    pub fn new(data: Vec<T>, total: i64, current_page: i64, per_page: i64) -> Self {
        let last_page = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            data,
            total,
            per_page,
            current_page,
            last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, per_page: Option<i64>) -> ListQuery {
        ListQuery {
            page,
            per_page,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 10);
        assert_eq!(q.offset(), 0);
        assert!(q.search().is_none());
    }

    #[test]
    fn test_page_clamped_to_one() {
        assert_eq!(query(Some(0), None).page(), 1);
        assert_eq!(query(Some(-3), None).page(), 1);
    }

    #[test]
    fn test_per_page_clamped() {
        assert_eq!(query(None, Some(0)).per_page(), 1);
        assert_eq!(query(None, Some(-1)).per_page(), 1);
        assert_eq!(query(None, Some(250)).per_page(), 100);
        assert_eq!(query(None, Some(25)).per_page(), 25);
    }

    #[test]
    fn test_offset() {
        assert_eq!(query(Some(3), Some(25)).offset(), 50);
        assert_eq!(query(Some(1), Some(10)).offset(), 0);
    }

    #[test]
    fn test_search_trimmed_and_emptied() {
        let mut q = ListQuery::default();
        q.search = Some("  10A ".to_string());
        assert_eq!(q.search(), Some("10A"));
        q.search = Some("   ".to_string());
        assert_eq!(q.search(), None);
    }

    #[test]
    fn test_sort_whitelist() {
        let mut q = ListQuery::default();
        assert!(matches!(q.sort(&["nombre"]), Ok(None)));

        q.sort_by = Some("nombre".to_string());
        assert_eq!(q.sort(&["nombre", "codigo"]).unwrap(), Some(("nombre", SortDir::Asc)));

        q.sort_dir = Some(SortDir::Desc);
        assert_eq!(q.sort(&["nombre"]).unwrap(), Some(("nombre", SortDir::Desc)));

        q.sort_by = Some("password".to_string());
        assert!(q.sort(&["nombre"]).is_err());
    }

    #[test]
    fn test_query_string_deserialization() {
        let q: ListQuery =
            serde_urlencoded_like("page=2&per_page=20&search=ana&sort_by=nombre&sort_dir=desc");
        assert_eq!(q.page(), 2);
        assert_eq!(q.per_page(), 20);
        assert_eq!(q.search(), Some("ana"));
        assert_eq!(q.sort(&["nombre"]).unwrap(), Some(("nombre", SortDir::Desc)));
    }

    // serde_json stands in for the query-string deserializer in unit tests
    fn serde_urlencoded_like(qs: &str) -> ListQuery {
        let map: serde_json::Map<String, serde_json::Value> = qs
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| {
                let value = v
                    .parse::<i64>()
                    .map(serde_json::Value::from)
                    .unwrap_or_else(|_| serde_json::Value::from(v));
                (k.to_string(), value)
            })
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_envelope_last_page() {
        let page = Paginated::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total, 21);

        let exact = Paginated::new(vec![0; 10], 20, 2, 10);
        assert_eq!(exact.last_page, 2);
    }

    #[test]
    fn test_envelope_empty_collection_has_one_page() {
        let page: Paginated<i32> = Paginated::new(vec![], 0, 1, 10);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_envelope_reports_requested_page() {
        // An out-of-range request keeps the requested page number
        let page: Paginated<i32> = Paginated::new(vec![], 21, 9, 10);
        assert_eq!(page.current_page, 9);
        assert_eq!(page.last_page, 3);
    }

    #[test]
    fn test_envelope_serializes_wire_shape() {
        let page = Paginated::new(vec!["a"], 1, 1, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"], serde_json::json!(["a"]));
        assert_eq!(json["total"], 1);
        assert_eq!(json["per_page"], 10);
        assert_eq!(json["current_page"], 1);
        assert_eq!(json["last_page"], 1);
    }
}
