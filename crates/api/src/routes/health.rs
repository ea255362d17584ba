//! Health check endpoint

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// Liveness plus a database round-trip.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || db.health_check())
        .await
        .map_err(|err| {
            ApiError(solvetrack_domain::SolveTrackError::Internal(format!(
                "health check task failed: {err}"
            )))
        })??;

    Ok(Json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
