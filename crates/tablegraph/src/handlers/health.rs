//! Health check endpoints for Kubernetes-style liveness and readiness checks.
//!
//! - `/livez` - Basic liveness (immediate 200, no checks)
//! - `/healthz` - Storage reachability (point lookup on every table)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness check.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage reachability check.
///
/// Returns 200 when storage answers within the engine timeout, 503 otherwise.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.engine.check_storage().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "healthy": true,
                "tables": state.engine.catalog().len()
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Storage check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": err.to_wire()
                })),
            )
                .into_response()
        }
    }
}
