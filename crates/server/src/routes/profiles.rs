use crate::error::{ServerError, ServerResult};
use crate::routes::matching::resolve_match_config;
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use intake::{ProfileRecord, ProfileSubmission};
use matcher::MatchHit;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Register-and-match request: store the profile, then return who it
/// resembles.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub profile: ProfileRecord,

    /// When the profile was captured by the form layer.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,

    /// Form schema version tag.
    #[serde(default, alias = "version")]
    pub schema_version: Option<String>,

    #[serde(default)]
    pub max_results: Option<usize>,

    #[serde(default)]
    pub min_score: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub profile_id: String,
    pub total_matches: usize,
    pub matches: Vec<MatchHit>,
}

/// Store the submitted profile under a fresh id and return its matches,
/// never including itself.
pub async fn register_profile(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RegisterRequest>,
) -> ServerResult<impl IntoResponse> {
    let config = resolve_match_config(
        &state.match_defaults,
        request.max_results,
        request.min_score,
    );

    let submission = ProfileSubmission {
        id: uuid::Uuid::new_v4().to_string(),
        profile: request.profile,
        saved_at: request.saved_at,
        schema_version: request.schema_version,
    };

    let registration = state.engine.register_profile(submission, &config)?;

    Ok(Json(RegisterResponse {
        profile_id: registration.profile_id,
        total_matches: registration.matches.len(),
        matches: registration.matches,
    }))
}

/// Fetch a stored profile's metadata by id.
pub async fn get_profile(
    State(state): State<Arc<ServerState>>,
    Path(profile_id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let record = state
        .engine
        .index()
        .get(&profile_id)?
        .ok_or(ServerError::NotFound)?;

    Ok(Json(json!({
        "profile_id": record.profile_id,
        "vector_dim": record.vector.len(),
        "metadata": record.metadata,
    })))
}

/// Delete a stored profile by id.
pub async fn delete_profile(
    State(state): State<Arc<ServerState>>,
    Path(profile_id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let index = state.engine.index();
    if index.get(&profile_id)?.is_none() {
        return Err(ServerError::NotFound);
    }
    index.delete(&profile_id)?;

    Ok(Json(json!({ "deleted": profile_id })))
}
