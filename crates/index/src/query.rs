use std::cmp::Ordering;

use crate::{IndexError, ProfileIndex};

/// Result entry for a similarity query.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Profile id of the matched record.
    pub profile_id: String,
    /// Cosine similarity (higher is more similar).
    pub score: f32,
    /// Metadata associated with the matched record.
    pub metadata: serde_json::Value,
}

/// Cosine similarity between two f32 vectors. Zero-norm operands and
/// mismatched lengths score 0.0 rather than erroring.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0f32;
    let mut norm_a = 0f32;
    let mut norm_b = 0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

impl ProfileIndex {
    /// Search for the top-k records most similar to `query`.
    ///
    /// Zero-score candidates are dropped; `min_score` tightens that floor.
    /// A zero-norm query matches nothing (callers are expected to have
    /// rejected it as insufficient signal already). Ordering is
    /// deterministic: descending score, ties broken by profile id.
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        min_score: Option<f32>,
    ) -> Result<Vec<QueryResult>, IndexError> {
        if top_k == 0 || query.iter().all(|&v| v == 0.0) {
            return Ok(Vec::new());
        }

        let floor = min_score.unwrap_or(0.0);
        let mut results = Vec::new();
        self.scan_records(&mut |record| {
            let score = cosine_similarity(query, &record.vector);
            if score > 0.0 && score >= floor {
                results.push(QueryResult {
                    profile_id: record.profile_id,
                    score,
                    metadata: record.metadata,
                });
            }
            Ok(())
        })?;

        results.sort_unstable_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.profile_id.cmp(&b.profile_id))
        });
        results.truncate(top_k);
        log::debug!("search returned {} of top_k={top_k}", results.len());
        Ok(results)
    }
}
