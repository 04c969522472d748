//! Error types produced by the intake crate.

use thiserror::Error;

/// Errors that can occur during submission validation and normalization.
///
/// All variants are cloneable and comparable so callers can match on them
/// precisely in tests and map them to HTTP responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntakeError {
    /// Submission id missing or empty after sanitization.
    #[error("submission requires a non-empty id")]
    MissingSubmissionId,

    /// A field key was empty after sanitization.
    #[error("profile contains a field with an empty key")]
    EmptyFieldKey,

    /// The profile exceeds the configured field count limit.
    #[error("profile has {count} fields, limit is {limit}")]
    TooManyFields { count: usize, limit: usize },

    /// A text value (or list element) exceeds the configured byte limit.
    #[error("field '{key}' value of {len} bytes exceeds limit of {limit}")]
    FieldTooLarge {
        key: String,
        len: usize,
        limit: usize,
    },

    /// A list value holds more elements than the configured limit.
    #[error("field '{key}' has {count} list items, limit is {limit}")]
    ListTooLong {
        key: String,
        count: usize,
        limit: usize,
    },
}

impl IntakeError {
    /// Suggested HTTP status code. Intake failures are always the client's
    /// input, so everything maps into the 4xx range.
    pub fn http_status_code(&self) -> u16 {
        match self {
            IntakeError::FieldTooLarge { .. } | IntakeError::ListTooLong { .. } => 413,
            _ => 400,
        }
    }
}
