//! Error types for configuration handling.
//!
//! Rendering itself never fails: a missing container or an empty heading
//! set is an expected state and results in no ToC. Only loading the host
//! configuration can produce an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TocError {
    #[error("Invalid ignoreHeaders pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
