mod arguments;
mod map;
mod types;

pub use arguments::{arguments_to_fields, source_value};
pub use map::{response_to_data, ResolverMap};
pub use types::{FieldRef, ResolverBinding, ResolverKind};
