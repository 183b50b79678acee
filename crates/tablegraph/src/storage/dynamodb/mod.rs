//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `StorageBackend`
//! using `aws-sdk-dynamodb`. Inserts use a conditional put on the partition
//! key, so put-if-absent is atomic on the server side.

mod conversions;
mod error;
mod storage;

pub use storage::DynamoDbStorage;
