//! Conversion of GraphQL argument objects into item fields.

use serde_json::{Map, Value};

use crate::mapping::ResolverError;
use crate::storage::Item;

/// Flattens an argument object into string fields.
///
/// Strings pass through, numbers and booleans use their canonical text form,
/// nulls are dropped. Lists and nested objects are rejected.
pub fn arguments_to_fields(arguments: &Map<String, Value>) -> Result<Item, ResolverError> {
    let mut item = Item::new();
    for (name, value) in arguments {
        if let Some(text) = scalar_to_string(name, value)? {
            item.insert(name.clone(), text);
        }
    }
    Ok(item)
}

/// Reads one scalar field of a parent object as a string.
pub fn source_value(source: &Map<String, Value>, field: &str) -> Result<String, ResolverError> {
    let value = source.get(field).unwrap_or(&Value::Null);
    scalar_to_string(field, value)?.ok_or_else(|| {
        ResolverError::ValidationError(format!("source object is missing field {field}"))
    })
}

fn scalar_to_string(name: &str, value: &Value) -> Result<Option<String>, ResolverError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ResolverError::ValidationError(format!(
            "argument {name} must be a scalar"
        ))),
    }
}
