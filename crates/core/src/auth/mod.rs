mod functions;
mod types;

pub use functions::caller_from_parts;
pub use types::{Access, AccessPolicy, Caller};
