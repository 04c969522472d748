use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use intake::{ProfileRecord, ProfileSubmission};
use matcher::{MatchConfig, MatchHit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Match request: a profile to compare against the stored population,
/// without storing it.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// The profile fields exactly as the form layer produced them.
    pub profile: ProfileRecord,

    /// Maximum results to return. Falls back to the server default.
    #[serde(default)]
    pub max_results: Option<usize>,

    /// Minimum similarity score a hit must reach.
    #[serde(default)]
    pub min_score: Option<f32>,
}

/// Match response
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub total_matches: usize,
    pub matches: Vec<MatchHit>,
}

pub(crate) fn resolve_match_config(
    defaults: &MatchConfig,
    max_results: Option<usize>,
    min_score: Option<f32>,
) -> MatchConfig {
    MatchConfig {
        max_results: max_results.unwrap_or(defaults.max_results),
        min_score: min_score.or(defaults.min_score),
    }
}

/// Find stored profiles similar to the submitted one.
///
/// The profile goes through the same intake → vectorize pipeline as
/// registration; a profile whose vector comes out all-zero is rejected
/// with 400 rather than queried.
pub async fn match_profiles(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<MatchRequest>,
) -> ServerResult<impl IntoResponse> {
    let config = resolve_match_config(
        &state.match_defaults,
        request.max_results,
        request.min_score,
    );

    let submission = ProfileSubmission::new(request.profile);
    let matches = state.engine.match_profile(submission, &config)?;

    Ok(Json(MatchResponse {
        total_matches: matches.len(),
        matches,
    }))
}
