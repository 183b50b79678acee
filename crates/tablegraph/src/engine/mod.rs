//! The resolver mapping engine.
//!
//! Turns a `Request` into storage calls and the storage results into a
//! `Response`. Pure shaping rules live in `tablegraph_core::mapping`; this
//! module owns the side effects: authorization, id generation, timeouts and
//! logging.

mod executor;

pub use executor::MappingEngine;
