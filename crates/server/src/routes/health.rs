use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint (liveness).
///
/// Reports the index name and vector dimension alongside the status so
/// operators can see at a glance which deployment answered.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "healthy",
        "service": "provec-server",
        "index": state.config.index_name,
        "vector_dim": state.engine.dimension(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
    }))
}

/// Readiness check endpoint
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    // The in-memory index is ready as soon as state construction finished.
    let profile_count = state.engine.index().len()?;

    Ok(Json(json!({
        "status": "ready",
        "service": "provec-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": {
            "api": "ready",
            "index": "ready",
            "embedding_lookup": "ready",
        },
        "profiles": profile_count,
    })))
}

/// Index statistics (authenticated)
pub async fn index_stats(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let profiles = state.engine.index().len()?;
    Ok(Json(json!({
        "index": state.config.index_name,
        "profiles": profiles,
        "vector_dim": state.engine.dimension(),
    })))
}
