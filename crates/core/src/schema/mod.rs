mod catalog;
mod error;
mod types;

pub use catalog::{Catalog, COMMENT_TABLE, DEMO_TABLE, TODOID_INDEX, TODO_TABLE};
pub use error::SchemaError;
pub use types::{IdPolicy, IndexSchema, TableSchema};
