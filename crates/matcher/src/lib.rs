//! Matching layer: vectorize a profile and query the index for similar
//! people.
//!
//! The engine is the caller the vectorizer's failure semantics are written
//! for: an all-zero profile vector is not an error down in the core, but it
//! is here — [`MatchError::InsufficientSignal`] — because storing or
//! querying a meaningless vector would only produce meaningless matches.

mod engine;
mod types;

pub use crate::engine::MatchEngine;
pub use crate::types::{MatchConfig, MatchError, MatchHit, Registration};
