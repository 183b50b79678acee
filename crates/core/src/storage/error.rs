use thiserror::Error;

/// Errors reported by a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Index {index} not found on table {table}")]
    IndexNotFound { table: String, index: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// The backend refused the request itself, e.g. an item over the size
    /// limit. Retrying the same request cannot succeed.
    #[error("Request rejected by storage: {0}")]
    InvalidRequest(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
