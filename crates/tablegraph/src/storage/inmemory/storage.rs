//! In-memory storage implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tablegraph_core::schema::TableSchema;
use tablegraph_core::storage::{Item, Key, Result, StorageBackend, StorageError};

/// Items of one table plus its secondary indexes.
///
/// Both live behind the same lock so an insert updates the item and every
/// index in one step.
#[derive(Debug, Default)]
struct TableData {
    items: HashMap<Key, Item>,
    /// index name -> indexed value -> primary keys
    indexes: HashMap<String, HashMap<String, HashSet<Key>>>,
}

/// In-memory storage backend.
///
/// Tables are created lazily on first access. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<RwLock<HashMap<String, Arc<RwLock<TableData>>>>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    async fn table(&self, schema: &TableSchema) -> Arc<RwLock<TableData>> {
        if let Some(table) = self.tables.read().await.get(&schema.name) {
            return table.clone();
        }

        self.tables
            .write()
            .await
            .entry(schema.name.clone())
            .or_default()
            .clone()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    async fn get(&self, table: &TableSchema, key: &Key) -> Result<Option<Item>> {
        let data = self.table(table).await;
        let data = data.read().await;
        Ok(data.items.get(key).cloned())
    }

    async fn put_if_absent(&self, table: &TableSchema, item: &Item) -> Result<bool> {
        let key = table
            .key_of(item)
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        let data = self.table(table).await;
        let mut data = data.write().await;

        if data.items.contains_key(&key) {
            return Ok(false);
        }

        for index in &table.indexes {
            // Sparse: items without the indexed field stay out of the index.
            if let Some(value) = item.get(&index.partition_key) {
                data.indexes
                    .entry(index.name.clone())
                    .or_default()
                    .entry(value.to_string())
                    .or_default()
                    .insert(key.clone());
            }
        }
        data.items.insert(key, item.clone());

        Ok(true)
    }

    async fn scan(&self, table: &TableSchema) -> Result<Vec<Item>> {
        let data = self.table(table).await;
        let data = data.read().await;
        Ok(data.items.values().cloned().collect())
    }

    async fn query_index(
        &self,
        table: &TableSchema,
        index_name: &str,
        value: &str,
    ) -> Result<Vec<Item>> {
        if table.index(index_name).is_none() {
            return Err(StorageError::IndexNotFound {
                table: table.name.clone(),
                index: index_name.to_string(),
            });
        }

        let data = self.table(table).await;
        let data = data.read().await;

        let Some(keys) = data
            .indexes
            .get(index_name)
            .and_then(|index| index.get(value))
        else {
            return Ok(Vec::new());
        };

        Ok(keys
            .iter()
            .filter_map(|key| data.items.get(key))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablegraph_core::schema::Catalog;

    fn todo_table() -> TableSchema {
        Catalog::default_catalog().table("todo").unwrap().clone()
    }

    fn comment_table() -> TableSchema {
        Catalog::default_catalog().table("comment").unwrap().clone()
    }

    fn comment(id: &str, todo: &str, text: &str) -> Item {
        Item::new()
            .with("commentid", id)
            .with("todoid", todo)
            .with("text", text)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let storage = InMemoryStorage::new();
        let table = todo_table();
        let item = Item::new().with("id", "t1").with("text", "buy milk");

        assert!(storage.put_if_absent(&table, &item).await.unwrap());

        let retrieved = storage.get(&table, &Key::partition("t1")).await.unwrap();
        assert_eq!(retrieved, Some(item));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let storage = InMemoryStorage::new();
        let result = storage
            .get(&todo_table(), &Key::partition("missing"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_if_absent_refuses_existing_key() {
        let storage = InMemoryStorage::new();
        let table = todo_table();
        let first = Item::new().with("id", "t1").with("text", "first");
        let second = Item::new().with("id", "t1").with("text", "second");

        assert!(storage.put_if_absent(&table, &first).await.unwrap());
        assert!(!storage.put_if_absent(&table, &second).await.unwrap());

        let retrieved = storage.get(&table, &Key::partition("t1")).await.unwrap();
        assert_eq!(retrieved, Some(first));
    }

    #[tokio::test]
    async fn test_composite_key_allows_same_partition_with_other_sort() {
        let storage = InMemoryStorage::new();
        let table = comment_table();

        assert!(storage
            .put_if_absent(&table, &comment("c1", "t1", "a"))
            .await
            .unwrap());
        assert!(storage
            .put_if_absent(&table, &comment("c1", "t2", "b"))
            .await
            .unwrap());
        assert!(!storage
            .put_if_absent(&table, &comment("c1", "t1", "c"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_put_without_key_field_is_invalid_data() {
        let storage = InMemoryStorage::new();
        let result = storage
            .put_if_absent(&comment_table(), &Item::new().with("commentid", "c1"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_scan_returns_all_items() {
        let storage = InMemoryStorage::new();
        let table = todo_table();

        for id in ["t1", "t2", "t3"] {
            storage
                .put_if_absent(&table, &Item::new().with("id", id))
                .await
                .unwrap();
        }

        let mut ids: Vec<String> = storage
            .scan(&table)
            .await
            .unwrap()
            .iter()
            .filter_map(|item| item.get("id").map(str::to_string))
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn test_scan_empty_table() {
        let storage = InMemoryStorage::new();
        assert!(storage.scan(&todo_table()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let storage = InMemoryStorage::new();
        let catalog = Catalog::default_catalog();
        let todo = catalog.table("todo").unwrap();
        let demo = catalog.table("demo").unwrap();

        storage
            .put_if_absent(todo, &Item::new().with("id", "x"))
            .await
            .unwrap();

        assert!(storage.scan(demo).await.unwrap().is_empty());
        assert!(storage
            .put_if_absent(demo, &Item::new().with("id", "x"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_query_index_returns_matching_items() {
        let storage = InMemoryStorage::new();
        let table = comment_table();

        storage
            .put_if_absent(&table, &comment("c1", "t1", "nice"))
            .await
            .unwrap();
        storage
            .put_if_absent(&table, &comment("c2", "t1", "agreed"))
            .await
            .unwrap();
        storage
            .put_if_absent(&table, &comment("c3", "t2", "other"))
            .await
            .unwrap();

        let mut texts: Vec<String> = storage
            .query_index(&table, "todoid-index", "t1")
            .await
            .unwrap()
            .iter()
            .filter_map(|item| item.get("text").map(str::to_string))
            .collect();
        texts.sort();

        assert_eq!(texts, vec!["agreed", "nice"]);
    }

    #[tokio::test]
    async fn test_query_index_no_matches() {
        let storage = InMemoryStorage::new();
        let result = storage
            .query_index(&comment_table(), "todoid-index", "nope")
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_query_unknown_index() {
        let storage = InMemoryStorage::new();
        let result = storage.query_index(&todo_table(), "text-index", "x").await;
        assert!(matches!(result, Err(StorageError::IndexNotFound { .. })));
    }

    #[tokio::test]
    async fn test_index_skips_items_without_indexed_field() {
        let storage = InMemoryStorage::new();
        let table = TableSchema::new("notes", "id").with_index("tag-index", "tag");

        storage
            .put_if_absent(&table, &Item::new().with("id", "n1").with("tag", "a"))
            .await
            .unwrap();
        storage
            .put_if_absent(&table, &Item::new().with("id", "n2"))
            .await
            .unwrap();

        let tagged = storage.query_index(&table, "tag-index", "a").await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(storage.scan(&table).await.unwrap().len(), 2);
    }
}
