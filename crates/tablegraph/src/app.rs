use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        execute::execute,
        health::{healthz, livez},
        resolve::resolve,
        tables::list_tables,
    },
    state::AppState,
};

/// Floor for the whole-request timeout.
const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Headroom over the storage timeout for routing and serialization.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Whole-request timeout for a given storage timeout.
///
/// Always outlasts the storage bound, so a slow backend is reported as
/// `StorageUnavailable` by the engine rather than cut off by the layer.
pub fn request_timeout(storage_timeout: Duration) -> Duration {
    MIN_REQUEST_TIMEOUT.max(storage_timeout.saturating_add(REQUEST_TIMEOUT_MARGIN))
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let timeout = request_timeout(state.engine.timeout());

    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-caller-sub"),
            HeaderName::from_static("x-caller-groups"),
        ]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/execute", post(execute))
        .route("/resolve", post(resolve))
        .route("/tables", get(list_tables))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
