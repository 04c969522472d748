//! Configuration for profile intake.

use serde::{Deserialize, Serialize};

/// Controls validation and normalization performed by
/// [`intake`](crate::intake).
///
/// Defaults are sized for interactive form submissions: a profile is a few
/// dozen short fields, not a document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Strip ASCII/Unicode control characters from the submission id and
    /// field keys before validation.
    #[serde(default = "default_true")]
    pub strip_control_chars: bool,

    /// Maximum number of fields accepted per profile.
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,

    /// Maximum byte length of a single text value (also applied per list
    /// element).
    #[serde(default = "default_max_field_text_bytes")]
    pub max_field_text_bytes: usize,

    /// Maximum number of elements in a list value.
    #[serde(default = "default_max_list_items")]
    pub max_list_items: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            strip_control_chars: true,
            max_fields: default_max_fields(),
            max_field_text_bytes: default_max_field_text_bytes(),
            max_list_items: default_max_list_items(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_fields() -> usize {
    64
}

fn default_max_field_text_bytes() -> usize {
    4 * 1024
}

fn default_max_list_items() -> usize {
    128
}
