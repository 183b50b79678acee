//! Field-to-operation bindings (Functional Core - pure data and planning).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::mapping::{Request, ResolverError, Response};
use crate::schema::{Catalog, SchemaError, COMMENT_TABLE, DEMO_TABLE, TODO_TABLE};

use super::arguments::{arguments_to_fields, source_value};
use super::{FieldRef, ResolverBinding, ResolverKind};

/// Bindings from GraphQL fields to engine operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverMap {
    bindings: BTreeMap<FieldRef, ResolverBinding>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a field, replacing any previous binding.
    pub fn bind(mut self, field: FieldRef, binding: ResolverBinding) -> Self {
        self.bindings.insert(field, binding);
        self
    }

    pub fn binding(&self, field: &FieldRef) -> Option<&ResolverBinding> {
        self.bindings.get(field)
    }

    /// Resolvers of the todo API.
    pub fn default_map() -> Self {
        Self::new()
            .bind(
                FieldRef::new("Query", "getTodos"),
                ResolverBinding::list(TODO_TABLE),
            )
            .bind(
                FieldRef::new("Mutation", "addTodo"),
                ResolverBinding::insert(TODO_TABLE),
            )
            .bind(
                FieldRef::new("Todo", "contents"),
                ResolverBinding::query_by_source(COMMENT_TABLE, "todoid", "id"),
            )
            .bind(
                FieldRef::new("Mutation", "addComment"),
                ResolverBinding::insert(COMMENT_TABLE),
            )
            .bind(
                FieldRef::new("Query", "getDemos"),
                ResolverBinding::list(DEMO_TABLE),
            )
            .bind(
                FieldRef::new("Mutation", "addDemo"),
                ResolverBinding::insert(DEMO_TABLE),
            )
    }

    /// Checks every binding targets a declared table and, for index
    /// queries, a declared index.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), SchemaError> {
        for binding in self.bindings.values() {
            let table = catalog
                .table(&binding.table)
                .ok_or_else(|| SchemaError::UnknownTable(binding.table.clone()))?;

            if let ResolverKind::QueryBySource { index_field, .. } = &binding.kind {
                if table.index_on(index_field).is_none() {
                    return Err(SchemaError::MissingIndex {
                        table: table.name.clone(),
                        field: index_field.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Turns a field invocation into an engine request.
    pub fn plan(
        &self,
        field: &FieldRef,
        arguments: &Map<String, Value>,
        source: Option<&Map<String, Value>>,
    ) -> Result<Request, ResolverError> {
        let binding = self
            .binding(field)
            .ok_or_else(|| ResolverError::ValidationError(format!("no resolver for {field}")))?;

        let request = match &binding.kind {
            ResolverKind::List => Request::list(&binding.table),
            ResolverKind::Insert => {
                Request::insert(&binding.table, arguments_to_fields(arguments)?)
            }
            ResolverKind::QueryBySource {
                index_field,
                source_field,
            } => {
                let source = source.ok_or_else(|| {
                    ResolverError::ValidationError(format!("{field} requires a source object"))
                })?;
                let value = source_value(source, source_field)?;
                Request::query_by_index(&binding.table, index_field, value)
            }
        };

        Ok(request)
    }
}

/// Shapes an engine response the way a GraphQL field returns it: an object
/// for a single item, an array for a sequence.
pub fn response_to_data(response: Response) -> Value {
    match response {
        Response::Item(item) => serde_json::to_value(item).unwrap_or(Value::Null),
        Response::Items(items) => serde_json::to_value(items).unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Item;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_default_map_is_valid_for_default_catalog() {
        let result = ResolverMap::default_map().validate(&Catalog::default_catalog());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_validate_rejects_unknown_table() {
        let map = ResolverMap::new().bind(
            FieldRef::new("Query", "getUsers"),
            ResolverBinding::list("users"),
        );

        let result = map.validate(&Catalog::default_catalog());

        assert_eq!(result, Err(SchemaError::UnknownTable("users".to_string())));
    }

    #[test]
    fn test_validate_rejects_missing_index() {
        let map = ResolverMap::new().bind(
            FieldRef::new("Todo", "owner"),
            ResolverBinding::query_by_source(TODO_TABLE, "owner", "id"),
        );

        let result = map.validate(&Catalog::default_catalog());

        assert!(matches!(result, Err(SchemaError::MissingIndex { .. })));
    }

    #[test]
    fn test_plan_list() {
        let request = ResolverMap::default_map()
            .plan(&FieldRef::new("Query", "getTodos"), &Map::new(), None)
            .unwrap();

        assert_eq!(request, Request::list("todo"));
    }

    #[test]
    fn test_plan_insert_from_arguments() {
        let args = object(json!({"text": "buy milk"}));

        let request = ResolverMap::default_map()
            .plan(&FieldRef::new("Mutation", "addTodo"), &args, None)
            .unwrap();

        assert_eq!(
            request,
            Request::insert("todo", Item::new().with("text", "buy milk"))
        );
    }

    #[test]
    fn test_plan_nested_field_uses_source() {
        let source = object(json!({"id": "t1", "text": "buy milk"}));

        let request = ResolverMap::default_map()
            .plan(
                &FieldRef::new("Todo", "contents"),
                &Map::new(),
                Some(&source),
            )
            .unwrap();

        assert_eq!(request, Request::query_by_index("comment", "todoid", "t1"));
    }

    #[test]
    fn test_plan_nested_field_without_source() {
        let result = ResolverMap::default_map().plan(
            &FieldRef::new("Todo", "contents"),
            &Map::new(),
            None,
        );

        assert_eq!(
            result,
            Err(ResolverError::ValidationError(
                "Todo.contents requires a source object".to_string()
            ))
        );
    }

    #[test]
    fn test_plan_unknown_field() {
        let result = ResolverMap::default_map().plan(
            &FieldRef::new("Mutation", "deleteTodo"),
            &Map::new(),
            None,
        );

        assert_eq!(
            result,
            Err(ResolverError::ValidationError(
                "no resolver for Mutation.deleteTodo".to_string()
            ))
        );
    }

    #[test]
    fn test_response_to_data_shapes() {
        let item = Item::new().with("id", "t1");

        assert_eq!(
            response_to_data(Response::Item(item.clone())),
            json!({"id": "t1"})
        );
        assert_eq!(
            response_to_data(Response::Items(vec![item])),
            json!([{"id": "t1"}])
        );
    }
}
