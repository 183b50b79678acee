use std::collections::HashSet;

use serde::Serialize;

use crate::storage::{Item, Key};

use super::SchemaError;

/// What to do when an insert omits the partition key value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Generate a random UUIDv4 string.
    Generate,
    /// Reject the insert.
    Required,
}

/// A secondary index keyed by a non-primary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSchema {
    pub name: String,
    pub partition_key: String,
}

/// Declaration of a key-value table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub name: String,
    pub partition_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    pub indexes: Vec<IndexSchema>,
    pub id_policy: IdPolicy,
}

impl TableSchema {
    /// Creates a table keyed by a single partition field with generated ids.
    pub fn new(name: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_key: partition_key.into(),
            sort_key: None,
            indexes: Vec::new(),
            id_policy: IdPolicy::Generate,
        }
    }

    /// Adds a sort key, making the primary key composite.
    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    /// Adds a secondary index on `field`.
    pub fn with_index(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.indexes.push(IndexSchema {
            name: name.into(),
            partition_key: field.into(),
        });
        self
    }

    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Returns the index keyed on `field`, if any.
    pub fn index_on(&self, field: &str) -> Option<&IndexSchema> {
        self.indexes.iter().find(|idx| idx.partition_key == field)
    }

    /// Returns the index named `name`, if any.
    pub fn index(&self, name: &str) -> Option<&IndexSchema> {
        self.indexes.iter().find(|idx| idx.name == name)
    }

    /// Extracts the primary key of an item.
    pub fn key_of(&self, item: &Item) -> Result<Key, SchemaError> {
        let partition = self.require_field(item, &self.partition_key)?;
        let sort = match &self.sort_key {
            Some(field) => Some(self.require_field(item, field)?),
            None => None,
        };
        Ok(Key { partition, sort })
    }

    fn require_field(&self, item: &Item, field: &str) -> Result<String, SchemaError> {
        item.get(field)
            .map(str::to_string)
            .ok_or_else(|| SchemaError::MissingKeyField {
                table: self.name.clone(),
                field: field.to_string(),
            })
    }

    /// Checks the declaration is internally consistent.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyTableName);
        }

        let empty_key = self.partition_key.is_empty()
            || self.sort_key.as_deref().is_some_and(str::is_empty)
            || self
                .indexes
                .iter()
                .any(|idx| idx.name.is_empty() || idx.partition_key.is_empty());
        if empty_key {
            return Err(SchemaError::EmptyKeyField {
                table: self.name.clone(),
            });
        }

        if self.sort_key.as_deref() == Some(self.partition_key.as_str()) {
            return Err(SchemaError::SortKeyEqualsPartitionKey {
                table: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for idx in &self.indexes {
            if !seen.insert(idx.name.as_str()) {
                return Err(SchemaError::DuplicateIndex {
                    table: self.name.clone(),
                    index: idx.name.clone(),
                });
            }
            if idx.partition_key == self.partition_key {
                return Err(SchemaError::IndexOnPartitionKey {
                    table: self.name.clone(),
                    index: idx.name.clone(),
                });
            }
        }

        Ok(())
    }
}
