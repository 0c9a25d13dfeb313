//! Wire encoders shared by both serializers
//!
//! A filter travels as `<path>:<value>`, where `<path>` is the traversal
//! token built by [`encode_traversal_path`]. The two outputs percent-encode
//! that composite differently, see [`EncodingPolicy`].

use crate::model::{FilterClause, TraversalStep};
use crate::operator::FilterOperator;

/// Percent-encoding applied to a filter composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingPolicy {
    /// Query-string form. The value is escaped, then the whole
    /// `path:value` composite is escaped again as one unit, so colons in
    /// the path become `%3A` and an escaped value is escaped twice.
    WholeComposite,

    /// Multi-value map form. Only the value segment is escaped; the path
    /// and its colons stay raw.
    ValueOnly,
}

/// Escape every byte outside ASCII alphanumerics and `-_.~`
pub fn percent_encode(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Flatten traversals and a field into `rel1:dir1:...:relN:dirN:field`
pub fn encode_traversal_path(field: &str, traversals: &[TraversalStep]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(traversals.len() * 2 + 1);
    for step in traversals {
        parts.push(&step.relation);
        parts.push(step.direction.as_str());
    }
    parts.push(field);
    parts.join(":")
}

/// Encode one clause as the value half of a `key=value` entry
pub fn encode_clause(clause: &FilterClause, policy: EncodingPolicy) -> String {
    let composite = format!(
        "{}:{}",
        encode_traversal_path(&clause.field, &clause.traversals),
        percent_encode(&clause.value.to_string())
    );
    match policy {
        EncodingPolicy::WholeComposite => percent_encode(&composite),
        EncodingPolicy::ValueOnly => composite,
    }
}

/// Encode every clause filed under an operator, preserving order
pub fn encode_operator(clauses: &[FilterClause], policy: EncodingPolicy) -> Vec<String> {
    clauses
        .iter()
        .map(|clause| encode_clause(clause, policy))
        .collect()
}

/// Encode an operator's clauses as flat `key=value` query-string pairs
pub fn encode_operator_pairs(op: FilterOperator, clauses: &[FilterClause]) -> Vec<String> {
    encode_operator(clauses, EncodingPolicy::WholeComposite)
        .into_iter()
        .map(|value| format!("{}={}", op.wire_key(), value))
        .collect()
}
