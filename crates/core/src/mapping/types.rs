use std::fmt;
use std::str::FromStr;

use crate::auth::Access;
use crate::storage::Item;

use super::ResolverError;

/// Operation tag carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Insert,
    QueryByIndex,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "List"),
            Self::Insert => write!(f, "Insert"),
            Self::QueryByIndex => write!(f, "QueryByIndex"),
        }
    }
}

impl FromStr for OperationKind {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "List" => Ok(Self::List),
            "Insert" => Ok(Self::Insert),
            "QueryByIndex" => Ok(Self::QueryByIndex),
            other => Err(ResolverError::ValidationError(format!(
                "unknown operation: {other}"
            ))),
        }
    }
}

/// A storage action with its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Insert {
        fields: Item,
    },
    QueryByIndex {
        index_field: String,
        index_value: String,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::List => OperationKind::List,
            Self::Insert { .. } => OperationKind::Insert,
            Self::QueryByIndex { .. } => OperationKind::QueryByIndex,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Insert { .. } => Access::Write,
            Self::List | Self::QueryByIndex { .. } => Access::Read,
        }
    }
}

/// An operation against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub table: String,
    pub operation: Operation,
}

impl Request {
    pub fn list(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            operation: Operation::List,
        }
    }

    pub fn insert(table: impl Into<String>, fields: Item) -> Self {
        Self {
            table: table.into(),
            operation: Operation::Insert { fields },
        }
    }

    pub fn query_by_index(
        table: impl Into<String>,
        index_field: impl Into<String>,
        index_value: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            operation: Operation::QueryByIndex {
                index_field: index_field.into(),
                index_value: index_value.into(),
            },
        }
    }
}

/// Successful result of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The item written by an insert.
    Item(Item),
    /// The items matched by a list or an index query.
    Items(Vec<Item>),
}

impl Response {
    pub fn len(&self) -> usize {
        match self {
            Self::Item(_) => 1,
            Self::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Item(item) => vec![item],
            Self::Items(items) => items,
        }
    }
}
