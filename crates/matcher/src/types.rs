use index::IndexError;
use intake::IntakeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a single match request.
///
/// Cheap to clone and serde-friendly so it can be embedded in request
/// bodies and higher-level configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Maximum number of results to return to the caller.
    #[serde(default = "MatchConfig::default_max_results")]
    pub max_results: usize,
    /// Minimum similarity score a hit must reach.
    #[serde(default)]
    pub min_score: Option<f32>,
}

impl MatchConfig {
    pub(crate) fn default_max_results() -> usize {
        10
    }

    /// Validate the configuration for a single request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be >= 1".into(),
            ));
        }
        if let Some(min_score) = self.min_score {
            if !min_score.is_finite() {
                return Err(MatchError::InvalidConfig(
                    "min_score must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_results: Self::default_max_results(),
            min_score: None,
        }
    }
}

/// Single match result, ranked from most to least similar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchHit {
    pub profile_id: String,
    pub score: f32,
    /// 1-based position in the result list.
    pub rank: usize,
    pub metadata: serde_json::Value,
}

/// Outcome of registering a new profile: its assigned id plus the matches
/// found for it (never including itself).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub profile_id: String,
    pub matches: Vec<MatchHit>,
}

/// Errors surfaced by the match engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// The profile produced an all-zero vector: nothing in it matched the
    /// embedding vocabulary, so no meaningful similarity query is
    /// possible. Callers must refuse to store or query such profiles.
    #[error("could not build a meaningful vector from profile")]
    InsufficientSignal,

    #[error("intake failure: {0}")]
    Intake(#[from] IntakeError),

    #[error("index failure: {0}")]
    Index(#[from] IndexError),

    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}
