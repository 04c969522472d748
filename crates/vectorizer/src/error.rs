use thiserror::Error;

/// Errors that can occur while loading embedding tables or validating
/// field specifications.
///
/// Vectorization itself never fails on data shape (missing or
/// out-of-vocabulary fields degrade to zero contributions); only
/// configuration and model loading have an error surface.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VectorizerError {
    #[error("failed to read word-vector table: {0}")]
    TableIo(#[from] std::io::Error),

    #[error("word-vector table line {line}: {message}")]
    MalformedTable { line: usize, message: String },

    #[error("word-vector table line {line}: expected {expected} components, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("word-vector table contains no vectors")]
    EmptyTable,

    #[error("embedding dimension must be >= 1")]
    InvalidDimension,

    #[error("invalid field specs: {0}")]
    InvalidFieldSpecs(String),
}
