use async_trait::async_trait;

use crate::schema::TableSchema;

use super::{Item, Key, Result};

/// Key-value storage the mapping engine runs against.
///
/// Tables are passed by schema so a backend knows the key layout and the
/// secondary indexes without keeping its own copy of the catalog.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Gets an item by its primary key.
    async fn get(&self, table: &TableSchema, key: &Key) -> Result<Option<Item>>;

    /// Writes an item unless one with the same primary key exists.
    ///
    /// Returns `false` when the key is taken. The check and the write must be
    /// a single atomic step.
    async fn put_if_absent(&self, table: &TableSchema, item: &Item) -> Result<bool>;

    /// Returns every item in the table, in no particular order.
    async fn scan(&self, table: &TableSchema) -> Result<Vec<Item>>;

    /// Returns every item whose indexed field equals `value`.
    async fn query_index(
        &self,
        table: &TableSchema,
        index_name: &str,
        value: &str,
    ) -> Result<Vec<Item>>;
}
