//! Filter model - clauses, traversals and facets of a search request

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Direction of a relationship edge relative to the current node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(QueryError::InvalidDirection(other.to_string())),
        }
    }
}

/// One hop across a typed relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraversalStep {
    /// Relationship name (e.g., "owns", "located_at")
    pub relation: String,

    /// Which way the edge is followed
    pub direction: Direction,
}

impl TraversalStep {
    pub fn new(relation: impl Into<String>, direction: Direction) -> Self {
        Self {
            relation: relation.into(),
            direction,
        }
    }

    /// Follow an edge that starts at the current node
    pub fn outgoing(relation: impl Into<String>) -> Self {
        Self::new(relation, Direction::Out)
    }

    /// Follow an edge that ends at the current node
    pub fn incoming(relation: impl Into<String>) -> Self {
        Self::new(relation, Direction::In)
    }
}

/// A scalar compared against a field
///
/// Only JSON scalars are accepted; arrays, objects and `null` fail to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(value.into())
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Integer(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

/// A single filter condition
///
/// Matches nodes reached by following `traversals` from the root whose
/// `field` compares to `value` under the operator the clause is filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Hops applied before reaching the field (empty = the root node)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traversals: Vec<TraversalStep>,

    pub field: String,

    pub value: FilterValue,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            traversals: Vec::new(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Append a traversal step
    pub fn via(mut self, step: TraversalStep) -> Self {
        self.traversals.push(step);
        self
    }
}

/// Field to aggregate results on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traversals: Vec<TraversalStep>,

    pub field: String,
}

impl FacetSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            traversals: Vec::new(),
            field: field.into(),
        }
    }

    pub fn via(mut self, step: TraversalStep) -> Self {
        self.traversals.push(step);
        self
    }
}
