//! Resolution API Routes
//!
//! | Endpoint | Method | Body on 200 |
//! |----------|--------|-------------|
//! | `/resolution/random` | GET | `{ "numbers": [ { "number", "meaning" } ] }` in draw order |
//! | `/resolution/meanings` | GET | `[ { "number", "meaning" } ]` ordered by number |
//! | `/api/v1/random` | GET | alias of `/resolution/random` |
//! | `/api/v1/smorfia` | GET | alias of `/resolution/meanings` |
//! | `/health` | GET | `{ "status": "ok" }` |
//!
//! Failures answer `500` with the JSON error contract from
//! [`super::error::AppError`].

use axum::{extract::State, Json};
use tracing::{debug, error, warn};

use super::error::AppError;
use super::AppState;
use crate::error::SmorfiaError;
use crate::models::{MeaningEntry, ResolvedDraw};
use crate::resolver::resolve_with_stats;

/// Fetch a fresh draw and join it against the meaning table.
///
/// The draw and the table are fetched concurrently and each outcome is
/// logged on its own, so a dead upstream never hides the state of the
/// local table (and vice versa).
pub async fn random_resolution(
    State(state): State<AppState>,
) -> Result<Json<ResolvedDraw>, AppError> {
    let (batch, table) = tokio::join!(state.source.fetch_batch(), state.store.load());

    match &table {
        Ok(rows) => debug!(
            backend = state.store.backend(),
            rows = rows.len(),
            "meaning table loaded"
        ),
        Err(e) => log_store_failure("resolve", state.store.backend(), e),
    }

    let batch = batch.map_err(|e| {
        log_upstream_failure(&e);
        AppError(e)
    })?;
    debug!(drawn = batch.len(), "upstream draw received");

    let table = table?;
    let resolution = resolve_with_stats(&batch, &table);
    if resolution.unresolved > 0 {
        warn!(
            unresolved = resolution.unresolved,
            drawn = batch.len(),
            table_rows = table.len(),
            "drawn numbers missing from meaning table"
        );
    }

    Ok(Json(ResolvedDraw {
        numbers: resolution.entries,
    }))
}

/// Full meaning table, number ascending.
pub async fn list_meanings(
    State(state): State<AppState>,
) -> Result<Json<Vec<MeaningEntry>>, AppError> {
    let table = state.store.load().await.map_err(|e| {
        log_store_failure("list", state.store.backend(), &e);
        AppError(e)
    })?;
    Ok(Json(table))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn log_upstream_failure(e: &SmorfiaError) {
    error!(
        domain = "upstream",
        code = e.code(),
        status = ?e.upstream_status(),
        error = %e,
        "upstream draw service failed"
    );
}

fn log_store_failure(operation: &str, backend: &str, e: &SmorfiaError) {
    error!(
        domain = "meaning_store",
        operation,
        backend,
        code = e.code(),
        error = %e,
        "meaning table unavailable"
    );
}
