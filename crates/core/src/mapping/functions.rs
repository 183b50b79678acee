//! Pure functions shaping inserts and index lookups (Functional Core).

use crate::schema::{IdPolicy, IndexSchema, TableSchema};
use crate::storage::{Item, Key};

use super::ResolverError;

/// Builds the item an insert will write.
///
/// When the partition key is absent and the table generates ids, the value
/// comes from `generate_id`. Sort keys are never generated. Key values must
/// not be empty.
pub fn build_item(
    table: &TableSchema,
    fields: Item,
    generate_id: impl FnOnce() -> String,
) -> Result<(Key, Item), ResolverError> {
    let mut item = fields;

    if !item.contains(&table.partition_key) {
        match table.id_policy {
            IdPolicy::Generate => {
                item.insert(table.partition_key.clone(), generate_id());
            }
            IdPolicy::Required => {
                return Err(missing_field(table, &table.partition_key));
            }
        }
    }

    if let Some(sort_key) = &table.sort_key {
        if !item.contains(sort_key) {
            return Err(missing_field(table, sort_key));
        }
    }

    let key = table
        .key_of(&item)
        .map_err(|e| ResolverError::ValidationError(e.to_string()))?;

    if key.partition.is_empty() {
        return Err(empty_field(table, &table.partition_key));
    }
    if let (Some(sort_key), Some("")) = (&table.sort_key, key.sort.as_deref()) {
        return Err(empty_field(table, sort_key));
    }

    Ok((key, item))
}

/// Finds the index that serves lookups by `field`.
pub fn resolve_index<'a>(
    table: &'a TableSchema,
    field: &str,
) -> Result<&'a IndexSchema, ResolverError> {
    table
        .index_on(field)
        .ok_or_else(|| ResolverError::IndexNotDefined {
            table: table.name.clone(),
            field: field.to_string(),
        })
}

fn missing_field(table: &TableSchema, field: &str) -> ResolverError {
    ResolverError::ValidationError(format!(
        "table {} requires field {}",
        table.name, field
    ))
}

fn empty_field(table: &TableSchema, field: &str) -> ResolverError {
    ResolverError::ValidationError(format!(
        "table {}: field {} must not be empty",
        table.name, field
    ))
}
