//! Error types for assetquery-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid traversal direction: {0} (expected \"in\" or \"out\")")]
    InvalidDirection(String),

    #[error("Invalid search request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
