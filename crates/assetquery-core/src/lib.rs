//! Assetquery Core - Search requests for the asset registry search API
//!
//! This crate provides:
//! - `SearchRequest`: type, ancestor, filter, facet and sort controls
//! - Traversal-qualified filters that reach fields on related nodes
//! - Encoding to an HTTP query string or a multi-value parameter map
//! - `SearchResults`: the shape of a search response

pub mod encode;
pub mod error;
pub mod model;
pub mod operator;
pub mod request;
pub mod results;

pub use encode::*;
pub use error::*;
pub use model::*;
pub use operator::*;
pub use request::*;
pub use results::*;
