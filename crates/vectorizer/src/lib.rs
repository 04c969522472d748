//! Weighted profile vectorizer.
//!
//! This crate turns a heterogeneous profile record (strings, numbers,
//! booleans, lists of strings) into one fixed-dimension vector via a
//! weighted average of per-field word-embedding vectors.
//!
//! ## Pipeline
//!
//! ```text
//! profile record → per-field text → tokenize → per-token lookup
//!                → per-field mean → weight → weighted aggregate
//! ```
//!
//! ## What we guarantee
//!
//! - **Pure**: no I/O, no clock, no globals. Same profile + specs + lookup
//!   = bit-identical output, on any machine.
//! - **Total**: malformed or missing data never errors; it degrades to a
//!   zero contribution. Only configuration and table loading can fail.
//! - **Order-invariant**: field spec order and token order do not change
//!   the result (up to float rounding).
//!
//! ## Degradation ladder
//!
//! Absent/null field → skipped entirely. Out-of-vocabulary field → zero
//! vector, but its weight still lands in the normalization denominator
//! (compatibility with stored vectors). Nothing usable at all → the zero
//! vector, which callers must treat as "insufficient signal".

mod aggregate;
mod embed;
mod error;
mod fields;
mod lookup;
mod stub;
mod text;

pub use crate::aggregate::{compute_profile_vector, field_text};
pub use crate::embed::{embed_text, is_zero_vector};
pub use crate::error::VectorizerError;
pub use crate::fields::{FieldSpec, FieldSpecList};
pub use crate::lookup::{EmbeddingLookup, WordVectorTable};
pub use crate::stub::HashedStubLookup;
pub use crate::text::{clean_text, tokenize};
