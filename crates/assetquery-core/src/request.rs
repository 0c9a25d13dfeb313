//! Search request aggregate and its two wire serializers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::encode::{
    encode_operator, encode_operator_pairs, encode_traversal_path, percent_encode, EncodingPolicy,
};
use crate::model::{FacetSpec, FilterClause};
use crate::operator::FilterOperator;
use crate::Result;

/// Parameter name to ordered values, for transports that take repeated
/// query parameters as arrays
pub type MultiValueQueryMap = BTreeMap<String, Vec<String>>;

/// A graph-aware search against the asset registry
///
/// Every field is optional. Empty strings, empty lists and `false` flags
/// produce no output in either wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Node types to include at the root (order kept, duplicates allowed)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// Node types to exclude at the root
    #[serde(default, rename = "ntypes", skip_serializing_if = "Vec::is_empty")]
    pub excluded_types: Vec<String>,

    /// Restrict the search to the subtree under this path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor_path: Option<String>,

    /// Whether the ancestor node itself can match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_ancestor: Option<bool>,

    /// Filter clauses per operator, each list in caller order
    #[serde(flatten)]
    pub clauses: BTreeMap<FilterOperator, Vec<FilterClause>>,

    /// Field to aggregate results on
    #[serde(default, rename = "facetField", skip_serializing_if = "Option::is_none")]
    pub facet: Option<FacetSpec>,

    /// Ask for a summary instead of full results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarize: Option<bool>,

    /// Attribute to sort results by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a request from its JSON document form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.types.push(node_type.into());
        self
    }

    pub fn with_excluded_type(mut self, node_type: impl Into<String>) -> Self {
        self.excluded_types.push(node_type.into());
        self
    }

    pub fn with_ancestor_path(mut self, path: impl Into<String>) -> Self {
        self.ancestor_path = Some(path.into());
        self
    }

    pub fn with_include_ancestor(mut self, include: bool) -> Self {
        self.include_ancestor = Some(include);
        self
    }

    /// File a clause under an operator, after any already there
    pub fn filter(mut self, op: FilterOperator, clause: FilterClause) -> Self {
        self.clauses.entry(op).or_default().push(clause);
        self
    }

    pub fn with_facet(mut self, facet: FacetSpec) -> Self {
        self.facet = Some(facet);
        self
    }

    pub fn with_summarize(mut self, summarize: bool) -> Self {
        self.summarize = Some(summarize);
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Clauses filed under an operator (empty if none)
    pub fn clauses_for(&self, op: FilterOperator) -> &[FilterClause] {
        self.clauses.get(&op).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Overwrite every field with a copy of `other`'s
    ///
    /// The copy is deep: later changes to either request's lists are not
    /// seen by the other.
    pub fn copy_from(&mut self, other: &SearchRequest) {
        self.clone_from(other);
    }

    /// True when both serializers would produce nothing
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.excluded_types.is_empty()
            && self.ancestor_path().is_none()
            && !self.include_ancestor.unwrap_or(false)
            && self.clauses.values().all(Vec::is_empty)
            && !self.summarize.unwrap_or(false)
            && self.facet.is_none()
            && self.sort().is_none()
    }

    fn ancestor_path(&self) -> Option<&str> {
        self.ancestor_path.as_deref().filter(|p| !p.is_empty())
    }

    fn sort(&self) -> Option<&str> {
        self.sort.as_deref().filter(|s| !s.is_empty())
    }

    fn facet_path(&self) -> Option<String> {
        self.facet
            .as_ref()
            .map(|facet| encode_traversal_path(&facet.field, &facet.traversals))
    }

    /// Encode as an `&`-joined query string (no leading `?`)
    ///
    /// Root-level values (`type`, `ntype`, `ancestorPath`, `sort`) are
    /// written raw; filter and facet values are percent-encoded.
    pub fn to_http_query_string(&self) -> String {
        let mut qs: Vec<String> = Vec::new();

        qs.extend(self.types.iter().map(|t| format!("type={}", t)));
        qs.extend(self.excluded_types.iter().map(|t| format!("ntype={}", t)));

        if let Some(path) = self.ancestor_path() {
            qs.push(format!("ancestorPath={}", path));
        }

        if self.include_ancestor == Some(true) {
            qs.push("includeAncestor=true".to_string());
        }

        for op in FilterOperator::ALL {
            qs.extend(encode_operator_pairs(op, self.clauses_for(op)));
        }

        if self.summarize == Some(true) {
            qs.push("summarize=true".to_string());
        }

        if let Some(path) = self.facet_path() {
            qs.push(format!("facetField={}", percent_encode(&path)));
        }

        if let Some(sort) = self.sort() {
            qs.push(format!("sort={}", sort));
        }

        trace!(pairs = qs.len(), "Encoded search request as query string");
        qs.join("&")
    }

    /// Encode as a parameter map, one key per parameter holding every value
    ///
    /// Filter values carry only value-level escaping; see
    /// [`EncodingPolicy::ValueOnly`].
    pub fn to_multi_value_query_map(&self) -> MultiValueQueryMap {
        let mut qs = MultiValueQueryMap::new();

        if !self.types.is_empty() {
            qs.insert("type".to_string(), self.types.clone());
        }

        if !self.excluded_types.is_empty() {
            qs.insert("ntype".to_string(), self.excluded_types.clone());
        }

        if let Some(path) = self.ancestor_path() {
            qs.insert("ancestorPath".to_string(), vec![path.to_string()]);
        }

        if self.include_ancestor == Some(true) {
            qs.insert("includeAncestor".to_string(), vec!["true".to_string()]);
        }

        for op in FilterOperator::ALL {
            let clauses = self.clauses_for(op);
            if !clauses.is_empty() {
                qs.insert(
                    op.wire_key().to_string(),
                    encode_operator(clauses, EncodingPolicy::ValueOnly),
                );
            }
        }

        if self.summarize == Some(true) {
            qs.insert("summarize".to_string(), vec!["true".to_string()]);
        }

        if let Some(path) = self.facet_path() {
            qs.insert("facetField".to_string(), vec![path]);
        }

        if let Some(sort) = self.sort() {
            qs.insert("sort".to_string(), vec![sort.to_string()]);
        }

        trace!(keys = qs.len(), "Encoded search request as multi-value map");
        qs
    }

    /// Attach the encoded query to a search endpoint URL
    ///
    /// Any query already on `endpoint` is replaced; an empty request
    /// leaves the URL without a query.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        let qs = self.to_http_query_string();
        url.set_query(if qs.is_empty() { None } else { Some(&qs) });
        url
    }

    /// Parse `endpoint` and attach the encoded query to it
    pub fn to_url_str(&self, endpoint: &str) -> Result<Url> {
        let endpoint: Url = endpoint.parse()?;
        Ok(self.to_url(&endpoint))
    }
}
