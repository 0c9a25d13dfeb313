//! Filter operators and their wire keys

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// How a filter value is compared against a field
///
/// Variants are declared in query-string emission order, so the derived
/// `Ord` and [`FilterOperator::ALL`] agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    StartsWith,
    EndsWith,
    Regex,
    Contains,
    Exist,
    Nexist,
}

impl FilterOperator {
    /// Every operator, in the order both serializers emit them.
    ///
    /// `regex` precedes `contains`: the search API's query-string consumer
    /// has always received them in this order.
    pub const ALL: [FilterOperator; 12] = [
        FilterOperator::Eq,
        FilterOperator::Neq,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::Regex,
        FilterOperator::Contains,
        FilterOperator::Exist,
        FilterOperator::Nexist,
    ];

    /// Query parameter name for this operator
    pub fn wire_key(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::Regex => "regex",
            FilterOperator::Contains => "contains",
            FilterOperator::Exist => "exist",
            FilterOperator::Nexist => "nexist",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.wire_key() == s)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_order_matches_ord() {
        let mut sorted = FilterOperator::ALL;
        sorted.sort();
        assert_eq!(sorted, FilterOperator::ALL);
    }

    #[test]
    fn test_regex_before_contains() {
        let keys: Vec<&str> = FilterOperator::ALL.iter().map(|op| op.wire_key()).collect();
        assert_eq!(
            keys,
            vec![
                "eq", "neq", "lt", "lte", "gt", "gte", "startsWith", "endsWith", "regex",
                "contains", "exist", "nexist"
            ]
        );
    }

    #[test]
    fn test_parse_round_trips_wire_key() {
        for op in FilterOperator::ALL {
            assert_eq!(op.wire_key().parse::<FilterOperator>().unwrap(), op);
            assert_eq!(op.to_string(), op.wire_key());
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "like".parse::<FilterOperator>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownOperator(ref s) if s == "like"));
        assert!("StartsWith".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_key() {
        let json = serde_json::to_string(&FilterOperator::StartsWith).unwrap();
        assert_eq!(json, "\"startsWith\"");
        let op: FilterOperator = serde_json::from_str("\"nexist\"").unwrap();
        assert_eq!(op, FilterOperator::Nexist);
    }
}
