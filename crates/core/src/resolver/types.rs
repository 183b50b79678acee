use std::fmt;

/// A GraphQL field: the parent type plus the field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef {
    pub type_name: String,
    pub field_name: String,
}

impl FieldRef {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// How a bound field turns into an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverKind {
    /// List every item of the table.
    List,
    /// Insert the field arguments as a new item.
    Insert,
    /// Query the index on `index_field` with the parent's `source_field` value.
    QueryBySource {
        index_field: String,
        source_field: String,
    },
}

/// Target table and operation for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverBinding {
    pub table: String,
    pub kind: ResolverKind,
}

impl ResolverBinding {
    pub fn list(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kind: ResolverKind::List,
        }
    }

    pub fn insert(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kind: ResolverKind::Insert,
        }
    }

    pub fn query_by_source(
        table: impl Into<String>,
        index_field: impl Into<String>,
        source_field: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            kind: ResolverKind::QueryBySource {
                index_field: index_field.into(),
                source_field: source_field.into(),
            },
        }
    }
}
