//! Table catalog (Functional Core - pure data).

use std::collections::BTreeMap;

use super::{SchemaError, TableSchema};

pub const TODO_TABLE: &str = "todo";
pub const COMMENT_TABLE: &str = "comment";
pub const DEMO_TABLE: &str = "demo";
pub const TODOID_INDEX: &str = "todoid-index";

/// The set of tables the engine serves, keyed by logical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: BTreeMap<String, TableSchema>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table after validating it.
    pub fn insert(&mut self, schema: TableSchema) -> Result<(), SchemaError> {
        schema.validate()?;
        if self.tables.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateTable(schema.name));
        }
        self.tables.insert(schema.name.clone(), schema);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// Iterates over the tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the tables of the todo API: todos, their comments, and demos.
    pub fn default_catalog() -> Self {
        let tables = [
            TableSchema::new(TODO_TABLE, "id"),
            TableSchema::new(COMMENT_TABLE, "commentid")
                .with_sort_key("todoid")
                .with_index(TODOID_INDEX, "todoid"),
            TableSchema::new(DEMO_TABLE, "id"),
        ];

        Self {
            tables: tables
                .into_iter()
                .map(|schema| (schema.name.clone(), schema))
                .collect(),
        }
    }
}
