//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and items.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use tablegraph_core::schema::TableSchema;
use tablegraph_core::storage::{Item, Key, StorageError};

/// Convert an item to a DynamoDB attribute map. Every field is stored as `S`.
pub fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(field, value)| (field.clone(), AttributeValue::S(value.clone())))
        .collect()
}

/// Convert a DynamoDB attribute map to an item.
///
/// Numbers keep their decimal text and booleans become `"true"`/`"false"`.
/// `NULL` attributes are dropped. Sets, lists, maps and binary values have
/// no string form and are rejected.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StorageError> {
    let mut item = Item::new();

    for (field, value) in attributes {
        let text = match value {
            AttributeValue::S(s) => s.clone(),
            AttributeValue::N(n) => n.clone(),
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Null(_) => continue,
            other => {
                return Err(StorageError::InvalidData(format!(
                    "field {field} has unsupported attribute type {}",
                    attribute_type_name(other)
                )))
            }
        };
        item.insert(field.clone(), text);
    }

    Ok(item)
}

/// Build the GetItem key map for a primary key.
pub fn key_to_attributes(table: &TableSchema, key: &Key) -> HashMap<String, AttributeValue> {
    let mut attributes = HashMap::new();
    attributes.insert(
        table.partition_key.clone(),
        AttributeValue::S(key.partition.clone()),
    );
    if let (Some(field), Some(value)) = (&table.sort_key, &key.sort) {
        attributes.insert(field.clone(), AttributeValue::S(value.clone()));
    }
    attributes
}

fn attribute_type_name(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::B(_) => "B",
        AttributeValue::Bs(_) => "BS",
        AttributeValue::L(_) => "L",
        AttributeValue::M(_) => "M",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Ss(_) => "SS",
        AttributeValue::S(_) => "S",
        AttributeValue::N(_) => "N",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::Null(_) => "NULL",
        _ => "unknown",
    }
}
