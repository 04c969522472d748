use std::sync::Arc;

use index::{IndexConfig, IndexRecord, ProfileIndex, QueryResult, INDEX_SCHEMA_VERSION};
use intake::{intake, sanitize_metadata, CanonicalProfile, IntakeConfig, ProfileSubmission};
use tracing::info;
use vectorizer::{compute_profile_vector, is_zero_vector, EmbeddingLookup, FieldSpecList};

use crate::types::{MatchConfig, MatchError, MatchHit, Registration};


/// Engine that turns profile submissions into similarity answers.
///
/// Holds the process-wide collaborators: the shared vector index, the
/// immutable embedding lookup, and the field weight table. All operations
/// are synchronous pure computations plus index access; the engine itself
/// keeps no mutable state and is safe to share behind an `Arc`.
pub struct MatchEngine {
    index: Arc<ProfileIndex>,
    lookup: Arc<dyn EmbeddingLookup>,
    field_specs: FieldSpecList,
    intake_cfg: IntakeConfig,
}

impl MatchEngine {
    /// Construct an engine around an existing index.
    pub fn new(
        index: ProfileIndex,
        lookup: Arc<dyn EmbeddingLookup>,
        field_specs: FieldSpecList,
        intake_cfg: IntakeConfig,
    ) -> Self {
        Self::with_index_arc(Arc::new(index), lookup, field_specs, intake_cfg)
    }

    /// Construct an engine from a shared index handle.
    pub fn with_index_arc(
        index: Arc<ProfileIndex>,
        lookup: Arc<dyn EmbeddingLookup>,
        field_specs: FieldSpecList,
        intake_cfg: IntakeConfig,
    ) -> Self {
        Self {
            index,
            lookup,
            field_specs,
            intake_cfg,
        }
    }

    /// Convenience helper building an in-memory index sized to the
    /// lookup's dimension. Intended for tests and ephemeral deployments.
    pub fn in_memory(
        lookup: Arc<dyn EmbeddingLookup>,
        field_specs: FieldSpecList,
        intake_cfg: IntakeConfig,
    ) -> Result<Self, MatchError> {
        let cfg = IndexConfig::new().with_dimension(lookup.dimension());
        let index = ProfileIndex::new(cfg)?;
        Ok(Self::new(index, lookup, field_specs, intake_cfg))
    }

    /// Shared handle to the underlying index.
    pub fn index(&self) -> &Arc<ProfileIndex> {
        &self.index
    }

    /// Dimension of every vector this engine produces.
    pub fn dimension(&self) -> usize {
        self.lookup.dimension()
    }

    /// Validate, vectorize, and reject profiles with no usable signal.
    fn vectorize(
        &self,
        submission: ProfileSubmission,
    ) -> Result<(CanonicalProfile, Vec<f32>), MatchError> {
        let canonical = intake(submission, &self.intake_cfg)?;
        let vector = compute_profile_vector(&canonical.profile, &self.field_specs, &*self.lookup);
        if is_zero_vector(&vector) {
            return Err(MatchError::InsufficientSignal);
        }
        Ok((canonical, vector))
    }

    /// Find profiles similar to the submitted one without storing it.
    pub fn match_profile(
        &self,
        submission: ProfileSubmission,
        config: &MatchConfig,
    ) -> Result<Vec<MatchHit>, MatchError> {
        config.validate()?;
        let (canonical, vector) = self.vectorize(submission)?;
        let hits = self
            .index
            .search(&vector, config.max_results, config.min_score)?;
        info!(
            submission_id = %canonical.submission_id,
            hits = hits.len(),
            "match_profile"
        );
        Ok(rank_hits(hits))
    }

    /// Store the submitted profile under a fresh id, then return its
    /// matches with the profile itself excluded.
    pub fn register_profile(
        &self,
        submission: ProfileSubmission,
        config: &MatchConfig,
    ) -> Result<Registration, MatchError> {
        config.validate()?;
        let (canonical, vector) = self.vectorize(submission)?;

        let profile_id = format!("user_{}", uuid::Uuid::new_v4().simple());
        let metadata = sanitize_metadata(
            &canonical.profile,
            &[
                (
                    "saved_at",
                    serde_json::json!(canonical.saved_at.to_rfc3339()),
                ),
                (
                    "schema_version",
                    canonical
                        .schema_version
                        .as_deref()
                        .map(|v| serde_json::json!(v))
                        .unwrap_or(serde_json::Value::Null),
                ),
            ],
        );

        self.index.upsert(&IndexRecord {
            schema_version: INDEX_SCHEMA_VERSION,
            profile_id: profile_id.clone(),
            vector: vector.clone(),
            metadata,
        })?;

        // Oversample by one so the self-hit never eats a result slot.
        let hits = self
            .index
            .search(&vector, config.max_results + 1, config.min_score)?;
        let matches: Vec<QueryResult> = hits
            .into_iter()
            .filter(|hit| hit.profile_id != profile_id)
            .take(config.max_results)
            .collect();

        info!(
            submission_id = %canonical.submission_id,
            profile_id = %profile_id,
            matches = matches.len(),
            "register_profile"
        );

        Ok(Registration {
            profile_id,
            matches: rank_hits(matches),
        })
    }
}

fn rank_hits(results: Vec<QueryResult>) -> Vec<MatchHit> {
    results
        .into_iter()
        .enumerate()
        .map(|(idx, hit)| MatchHit {
            profile_id: hit.profile_id,
            score: hit.score,
            rank: idx + 1,
            metadata: hit.metadata,
        })
        .collect()
}
