//! Core types and pure functions for the tablegraph resolver engine.
//!
//! Everything here is free of I/O: table declarations, request and response
//! shapes, error kinds, access policy, and the storage trait that backends
//! implement.

pub mod auth;
pub mod mapping;
pub mod resolver;
pub mod schema;
pub mod storage;
