//! Serialized request and response shapes for crossing a network boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage::Item;

use super::{OperationKind, Request, ResolverError, Response};

/// Wire form of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub operation: String,
    pub table: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_value: Option<String>,
}

impl TryFrom<RequestEnvelope> for Request {
    type Error = ResolverError;

    fn try_from(envelope: RequestEnvelope) -> Result<Self, Self::Error> {
        if envelope.table.trim().is_empty() {
            return Err(ResolverError::ValidationError(
                "table must not be empty".to_string(),
            ));
        }

        let request = match envelope.operation.parse::<OperationKind>()? {
            OperationKind::List => Request::list(envelope.table),
            OperationKind::Insert => Request::insert(envelope.table, Item::from(envelope.fields)),
            OperationKind::QueryByIndex => {
                let (Some(field), Some(value)) = (envelope.index_field, envelope.index_value) else {
                    return Err(ResolverError::ValidationError(
                        "QueryByIndex requires indexField and indexValue".to_string(),
                    ));
                };
                Request::query_by_index(envelope.table, field, value)
            }
        };

        Ok(request)
    }
}

/// Wire form of a [`Response`] or a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn from_error(error: &ResolverError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error.to_wire()),
        }
    }
}

impl From<Response> for ResponseEnvelope {
    fn from(response: Response) -> Self {
        Self {
            items: response.into_items(),
            error: None,
        }
    }
}

impl From<Result<Response, ResolverError>> for ResponseEnvelope {
    fn from(result: Result<Response, ResolverError>) -> Self {
        match result {
            Ok(response) => response.into(),
            Err(error) => Self::from_error(&error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> RequestEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_list_envelope_ignores_fields() {
        let request = Request::try_from(envelope(json!({
            "operation": "List",
            "table": "todo",
            "fields": {"text": "ignored"}
        })))
        .unwrap();

        assert_eq!(request, Request::list("todo"));
    }

    #[test]
    fn test_insert_envelope_carries_fields() {
        let request = Request::try_from(envelope(json!({
            "operation": "Insert",
            "table": "todo",
            "fields": {"text": "buy milk"}
        })))
        .unwrap();

        assert_eq!(
            request,
            Request::insert("todo", Item::new().with("text", "buy milk"))
        );
    }

    #[test]
    fn test_query_envelope_uses_camel_case_keys() {
        let request = Request::try_from(envelope(json!({
            "operation": "QueryByIndex",
            "table": "comment",
            "indexField": "todoid",
            "indexValue": "t1"
        })))
        .unwrap();

        assert_eq!(request, Request::query_by_index("comment", "todoid", "t1"));
    }

    #[test]
    fn test_query_envelope_without_value_is_rejected() {
        let result = Request::try_from(envelope(json!({
            "operation": "QueryByIndex",
            "table": "comment",
            "indexField": "todoid"
        })));

        assert!(matches!(result, Err(ResolverError::ValidationError(_))));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = Request::try_from(envelope(json!({
            "operation": "List",
            "table": ""
        })));

        assert!(matches!(result, Err(ResolverError::ValidationError(_))));
    }

    #[test]
    fn test_single_item_response_serializes_as_list() {
        let response = Response::Item(Item::new().with("id", "t1").with("text", "buy milk"));

        let json = serde_json::to_value(ResponseEnvelope::from(response)).unwrap();

        assert_eq!(json, json!({"items": [{"id": "t1", "text": "buy milk"}]}));
    }

    #[test]
    fn test_error_response_serializes_kind_and_message() {
        let result: Result<Response, ResolverError> = Err(ResolverError::IndexNotDefined {
            table: "todo".to_string(),
            field: "text".to_string(),
        });

        let json = serde_json::to_value(ResponseEnvelope::from(result)).unwrap();

        assert_eq!(
            json,
            json!({
                "items": [],
                "error": "IndexNotDefined: no index defined on field text of table todo"
            })
        );
    }
}
