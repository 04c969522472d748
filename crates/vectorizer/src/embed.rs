//! Text embedding: mean of recognized token vectors.

use crate::lookup::EmbeddingLookup;
use crate::text::tokenize;

/// Embed free text as the component-wise mean of its recognized token
/// vectors.
///
/// Out-of-vocabulary tokens are skipped, never an error. When no token is
/// recognized (or the text yields no tokens at all) the result is the zero
/// vector of the lookup's dimension. Pure: same text + same lookup = same
/// vector.
pub fn embed_text<L>(text: &str, lookup: &L) -> Vec<f32>
where
    L: EmbeddingLookup + ?Sized,
{
    let mut acc = vec![0f32; lookup.dimension()];
    let mut found = 0usize;

    for token in tokenize(text) {
        if let Some(vector) = lookup.vector_for_token(&token) {
            for (slot, value) in acc.iter_mut().zip(vector.iter()) {
                *slot += value;
            }
            found += 1;
        }
    }

    if found > 0 {
        let inv = 1.0 / found as f32;
        for slot in acc.iter_mut() {
            *slot *= inv;
        }
    }
    acc
}

/// True when every component is exactly zero. Used by callers to detect
/// "no meaningful vector could be built".
pub fn is_zero_vector(vector: &[f32]) -> bool {
    vector.iter().all(|&v| v == 0.0)
}
