use axum::{extract::State, Json};
use tablegraph_core::schema::TableSchema;

use crate::state::AppState;

/// List the tables of the catalog with their keys and indexes.
#[axum::debug_handler]
pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<TableSchema>> {
    Json(state.engine.catalog().tables().cloned().collect())
}
