use thiserror::Error;

use crate::storage::{Key, StorageError};

/// Failure of a single engine request.
///
/// Every variant except `StorageUnavailable` is terminal: retrying the same
/// request cannot succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("key {key} already exists in table {table}")]
    DuplicateKey { table: String, key: Key },
    #[error("no index defined on field {field} of table {table}")]
    IndexNotDefined { table: String, field: String },
    #[error("{0}")]
    StorageUnavailable(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    Unauthorized(String),
}

impl ResolverError {
    /// Stable name of the error kind, as reported on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "DuplicateKey",
            Self::IndexNotDefined { .. } => "IndexNotDefined",
            Self::StorageUnavailable(_) => "StorageUnavailable",
            Self::ValidationError(_) => "ValidationError",
            Self::Unauthorized(_) => "Unauthorized",
        }
    }

    /// True when the caller may retry with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// `<Kind>: <message>`, the form carried in a wire response.
    pub fn to_wire(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

impl From<StorageError> for ResolverError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidRequest(_) => Self::ValidationError(err.to_string()),
            err => Self::StorageUnavailable(err.to_string()),
        }
    }
}
