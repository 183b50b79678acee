mod error;
mod traits;
mod types;

pub use error::{Result, StorageError};
pub use traits::StorageBackend;
pub use types::{Item, Key};
