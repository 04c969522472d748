//! Workspace umbrella crate for provec.
//!
//! This crate stitches intake validation and weighted vectorization
//! together so callers can turn a raw profile submission into a profile
//! vector with a single API entry point, and re-exports the types the
//! member crates define.

pub use intake::{
    intake, sanitize_metadata, CanonicalProfile, FieldValue, IntakeConfig, IntakeError,
    ProfileRecord, ProfileSubmission,
};
pub use vectorizer::{
    compute_profile_vector, embed_text, field_text, is_zero_vector, tokenize, EmbeddingLookup,
    FieldSpec, FieldSpecList, HashedStubLookup, VectorizerError, WordVectorTable,
};
pub use index::{
    BackendConfig, IndexConfig, IndexError, IndexRecord, ProfileIndex, QueryResult,
    INDEX_SCHEMA_VERSION,
};
pub use matcher::{MatchConfig, MatchEngine, MatchError, MatchHit, Registration};

mod config;

pub use crate::config::{ConfigLoadError, EmbeddingSourceConfig, ProvecConfig};

use std::error::Error;
use std::fmt;

/// Errors that can occur while pushing a submission through the pipeline.
#[derive(Debug)]
pub enum PipelineError {
    Intake(IntakeError),
    /// The profile produced an all-zero vector; there is nothing
    /// meaningful to store or query.
    InsufficientSignal,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Intake(err) => write!(f, "intake failure: {err}"),
            PipelineError::InsufficientSignal => {
                write!(f, "could not build a meaningful vector from profile")
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Intake(err) => Some(err),
            PipelineError::InsufficientSignal => None,
        }
    }
}

impl From<IntakeError> for PipelineError {
    fn from(value: IntakeError) -> Self {
        PipelineError::Intake(value)
    }
}

/// A computed profile vector together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileVector {
    /// Sanitized id of the submission the vector was computed from.
    pub submission_id: String,
    /// The vector itself, of the lookup's dimension.
    pub vector: Vec<f32>,
}

impl ProfileVector {
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Run intake and weighted vectorization end-to-end with explicit
/// configuration. All-zero vectors are rejected as
/// [`PipelineError::InsufficientSignal`]; callers that want the raw
/// (possibly zero) vector should use [`compute_profile_vector`] directly.
pub fn vectorize_submission(
    raw: ProfileSubmission,
    intake_cfg: &IntakeConfig,
    field_specs: &FieldSpecList,
    lookup: &dyn EmbeddingLookup,
) -> Result<ProfileVector, PipelineError> {
    let canonical = intake(raw, intake_cfg)?;
    let vector = compute_profile_vector(&canonical.profile, field_specs, lookup);
    if is_zero_vector(&vector) {
        return Err(PipelineError::InsufficientSignal);
    }
    Ok(ProfileVector {
        submission_id: canonical.submission_id,
        vector,
    })
}

/// Convenience helper using default intake configuration and the stock
/// field schema.
pub fn vectorize_profile(
    raw: ProfileSubmission,
    lookup: &dyn EmbeddingLookup,
) -> Result<ProfileVector, PipelineError> {
    vectorize_submission(
        raw,
        &IntakeConfig::default(),
        &FieldSpecList::default(),
        lookup,
    )
}
