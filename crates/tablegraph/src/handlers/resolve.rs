//! Field-level resolution: the GraphQL-facing side of the engine.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tablegraph_core::mapping::ResolverError;
use tablegraph_core::resolver::{response_to_data, FieldRef};

use crate::{context::RequestContext, handlers::error::status_for, state::AppState};

/// A single field invocation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub type_name: String,
    pub field_name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
    /// Parent object for nested fields such as `Todo.contents`.
    #[serde(default)]
    pub source: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolveResponse {
    fn failure(error: &ResolverError) -> Response {
        let body = Self {
            data: Value::Null,
            error: Some(error.to_wire()),
        };
        (status_for(error), Json(body)).into_response()
    }
}

/// Resolve one field through the resolver map.
#[axum::debug_handler]
pub async fn resolve(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return ResolveResponse::failure(&ResolverError::ValidationError(
                rejection.body_text(),
            ))
        }
    };

    let field = FieldRef::new(input.type_name, input.field_name);
    tracing::debug!(request_id = %ctx.request_id, %field, "Resolving field");

    let request = match state
        .resolvers
        .plan(&field, &input.arguments, input.source.as_ref())
    {
        Ok(request) => request,
        Err(err) => return ResolveResponse::failure(&err),
    };

    match state.engine.execute(&ctx.caller, request).await {
        Ok(response) => (
            StatusCode::OK,
            Json(ResolveResponse {
                data: response_to_data(response),
                error: None,
            }),
        )
            .into_response(),
        Err(err) => ResolveResponse::failure(&err),
    }
}
