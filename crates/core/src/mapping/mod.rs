mod error;
mod functions;
mod http_mapping;
mod types;
mod wire;

pub use error::ResolverError;
pub use functions::{build_item, resolve_index};
pub use http_mapping::resolver_error_to_status_code;
pub use types::{Operation, OperationKind, Request, Response};
pub use wire::{RequestEnvelope, ResponseEnvelope};
