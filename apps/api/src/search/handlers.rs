//! Axum route handlers for the Search API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::catalog::parse_demands;
use crate::errors::AppError;
use crate::models::validation::validate_demands;
use crate::models::SearchResult;
use crate::search::find_locations_with_limits;
use crate::state::AppState;

/// POST /search
///
/// Body: JSON array of `{ "length", "quantity" }` objects (field names case-insensitive).
/// Returns every location able to store all vehicles, cheapest first.
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let Json(body) = payload
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;
    let demands = parse_demands(body)
        .map_err(|e| AppError::Validation(format!("Invalid vehicle list: {e}")))?;
    validate_demands(&demands)?;

    let catalog = Arc::clone(&state.catalog);
    let limits = state.limits;
    let vehicle_kinds = demands.len();

    // CPU-bound search — spawn_blocking to avoid blocking the async executor.
    let results = tokio::task::spawn_blocking(move || {
        find_locations_with_limits(&demands, &catalog, &limits)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Search task failed: {e}")))??;

    info!(
        "Search for {vehicle_kinds} vehicle entries matched {} locations",
        results.len()
    );
    Ok(Json(results))
}
