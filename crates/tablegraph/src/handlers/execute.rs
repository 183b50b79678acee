use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tablegraph_core::mapping::{Request, RequestEnvelope, ResolverError, ResponseEnvelope};

use crate::{context::RequestContext, handlers::AppError, state::AppState};

/// Execute a wire request against the engine.
#[axum::debug_handler]
pub async fn execute(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(envelope) =
        payload.map_err(|rejection| ResolverError::ValidationError(rejection.body_text()))?;

    tracing::debug!(
        request_id = %ctx.request_id,
        operation = %envelope.operation,
        table = %envelope.table,
        "Executing request"
    );

    let request = Request::try_from(envelope)?;
    let response = state.engine.execute(&ctx.caller, request).await?;

    Ok(Json(response.into()))
}
