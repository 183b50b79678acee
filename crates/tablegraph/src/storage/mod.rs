//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `StorageBackend`
//! trait defined in `tablegraph_core::storage`. The backend the server runs
//! with is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local tables, lost on restart
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory backend is always compiled because the
//! test suite runs against it.
//!
//! # Examples
//!
//! Build with the in-memory backend (default):
//! ```bash
//! cargo build -p tablegraph
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p tablegraph --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p tablegraph --features inmemory"
);

#[cfg_attr(not(feature = "inmemory"), allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStorage;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStorage;
