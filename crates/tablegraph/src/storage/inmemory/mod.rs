//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `StorageBackend` that
//! keeps each table in a HashMap wrapped in `Arc<RwLock<_>>`, together with
//! its secondary indexes. Data is not persisted; it backs local development
//! and the test suite.
//!
//! # Example
//!
//! ```rust,ignore
//! use tablegraph::storage::inmemory::InMemoryStorage;
//!
//! let storage = InMemoryStorage::new();
//! // Hand it to a MappingEngine...
//! ```

mod storage;

pub use storage::InMemoryStorage;
