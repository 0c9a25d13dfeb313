//! Search response shape

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Window of results returned by a paged search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub count: u64,
}

/// Results of a search
///
/// Node resources are kept as raw JSON unless the caller names a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults<T = serde_json::Value> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,

    /// Total number of matches (may be more than returned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> SearchResults<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            pagination: None,
            total: None,
        }
    }
}

impl<T: DeserializeOwned> SearchResults<T> {
    /// Parse a search response body
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Device {
        device_id: String,
    }

    #[test]
    fn test_parse_opaque_results() {
        let results: SearchResults = SearchResults::from_json(
            r#"{"results": [{"deviceId": "pump-1"}, {"groupPath": "/site"}],
                "pagination": {"offset": 0, "count": 2}, "total": 17}"#,
        )
        .unwrap();
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[1]["groupPath"], "/site");
        assert_eq!(results.pagination, Some(Pagination { offset: 0, count: 2 }));
        assert_eq!(results.total, Some(17));
    }

    #[test]
    fn test_parse_typed_summary() {
        let results: SearchResults<Device> =
            SearchResults::from_json(r#"{"results": [{"deviceId": "pump-1"}]}"#).unwrap();
        assert_eq!(
            results.results,
            vec![Device {
                device_id: "pump-1".into()
            }]
        );
        assert!(results.pagination.is_none());
        assert!(results.total.is_none());

        let summary: SearchResults = SearchResults::from_json(r#"{"total": 3}"#).unwrap();
        assert!(summary.results.is_empty());
        assert_eq!(summary.total, Some(3));
    }

    #[test]
    fn test_empty() {
        let results: SearchResults = SearchResults::empty();
        assert!(results.results.is_empty());
        assert!(results.total.is_none());
    }
}
