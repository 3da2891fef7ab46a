//! Error types for pokedex_sync

use thiserror::Error;

/// Unified error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Response body did not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Listing entry and detail payload could not be combined
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),
    /// A blocking storage task panicked or was cancelled
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl CatalogError {
    /// True for transport-level failures (connection errors and non-2xx statuses)
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::HttpStatus(_))
    }

    /// True when the payload arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode(_))
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(err: tokio::task::JoinError) -> Self {
        CatalogError::TaskFailed(err.to_string())
    }
}

/// Why a listing entry and its detail payload could not be merged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Entry with id {id} has an empty name")]
    EmptyName { id: i64 },
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
