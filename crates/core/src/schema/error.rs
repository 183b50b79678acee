use thiserror::Error;

/// Errors raised while declaring tables or binding resolvers to them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table name must not be empty")]
    EmptyTableName,
    #[error("Table {table}: key field names must not be empty")]
    EmptyKeyField { table: String },
    #[error("Table {table}: sort key must differ from the partition key")]
    SortKeyEqualsPartitionKey { table: String },
    #[error("Table {table}: index {index} is declared more than once")]
    DuplicateIndex { table: String, index: String },
    #[error("Table {table}: index {index} must not be keyed on the partition key")]
    IndexOnPartitionKey { table: String, index: String },
    #[error("Table {0} is already declared")]
    DuplicateTable(String),
    #[error("Table {0} is not declared")]
    UnknownTable(String),
    #[error("Table {table}: no index on field {field}")]
    MissingIndex { table: String, field: String },
    #[error("Table {table}: item is missing key field {field}")]
    MissingKeyField { table: String, field: String },
}
