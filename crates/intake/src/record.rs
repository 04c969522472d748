//! Core data model types for profile intake.
//!
//! A profile is a flat mapping from field key to a loosely typed value. The
//! form layer upstream produces JSON; the tagged [`FieldValue`] union replaces
//! the "anything goes" dynamic typing of that layer with an explicit, closed
//! set of shapes the rest of the pipeline can rely on.
//!
//! ```text
//! ProfileSubmission
//! ├── id: String
//! ├── profile: ProfileRecord (field key -> FieldValue)
//! ├── saved_at: Option<DateTime<Utc>>
//! └── schema_version: Option<String>
//!
//!         ↓ intake()
//!
//! CanonicalProfile
//! ├── submission_id: String (sanitized)
//! ├── profile: ProfileRecord (keys sanitized, nulls dropped)
//! ├── saved_at: DateTime<Utc> (default applied)
//! └── schema_version: Option<String>
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single profile field value.
///
/// Variant order matters for untagged deserialization: `Null` must come
/// first so JSON `null` does not fall through to an error, and `Flag`
/// before `Number` so booleans are not coerced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit JSON `null`. Treated downstream exactly like an absent key.
    Null,
    /// Boolean scalar.
    Flag(bool),
    /// Numeric scalar (integers and floats share one representation).
    Number(f64),
    /// Free-text scalar.
    Text(String),
    /// Ordered list of strings (skills, interests, languages, ...).
    List(Vec<String>),
}

impl FieldValue {
    /// True for explicit nulls, which carry no information.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// An immutable mapping from field key to value.
///
/// Backed by a `BTreeMap` so iteration order (and therefore serialization
/// and logging) is deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ProfileRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field by key. Absent keys and explicit nulls are distinct
    /// here; callers that treat them the same should also check
    /// [`FieldValue::is_null`].
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for ProfileRecord {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The inbound record for intake: one profile as submitted by the form
/// layer or loaded from storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSubmission {
    /// Unique identifier for this submission, used for tracing and log
    /// correlation. Callers that have nothing better should pass a UUID.
    pub id: String,
    /// The profile fields themselves.
    pub profile: ProfileRecord,
    /// When the profile was captured. Defaults to intake time when absent.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Version tag of the form schema that produced this profile.
    #[serde(default)]
    pub schema_version: Option<String>,
}

impl ProfileSubmission {
    /// Convenience constructor for a bare profile with a fresh UUID id.
    pub fn new(profile: ProfileRecord) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            profile,
            saved_at: None,
            schema_version: None,
        }
    }
}

/// Normalized submission produced by [`intake`](crate::intake).
///
/// Guarantees: the id is non-empty and free of control characters, every
/// field key is non-empty, no field holds an explicit null, and all
/// configured size limits were enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalProfile {
    /// Sanitized submission id.
    pub submission_id: String,
    /// Sanitized profile fields.
    pub profile: ProfileRecord,
    /// Effective capture timestamp.
    pub saved_at: DateTime<Utc>,
    /// Form schema version tag, if the caller provided one.
    pub schema_version: Option<String>,
}
