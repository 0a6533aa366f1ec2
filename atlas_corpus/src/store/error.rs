//! Corpus loading errors.

use thiserror::Error;

/// Result type for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Failures that prevent the whole dataset from loading.
///
/// Problems inside individual records are never reported here; those
/// records are skipped or their fields dropped.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The dataset file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset is valid JSON but not an array of records.
    #[error("dataset must be a JSON array of works, found {0}")]
    NotAnArray(&'static str),
}
