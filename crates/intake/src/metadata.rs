//! Sanitization helpers: submission ids, field keys, and the metadata
//! document attached to index records.

use serde_json::{Map, Value};

use crate::error::IntakeError;
use crate::record::{FieldValue, ProfileRecord};

/// Strip control characters from a string, preserving everything else.
pub(crate) fn strip_control_chars(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Sanitize a required identifier: optionally strip control characters,
/// trim, and reject empty results.
pub(crate) fn sanitize_submission_id(id: String, strip: bool) -> Result<String, IntakeError> {
    let cleaned = if strip { strip_control_chars(&id) } else { id };
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingSubmissionId);
    }
    if trimmed.len() == cleaned.len() {
        Ok(cleaned)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Sanitize a field key. Empty keys carry no meaning and are rejected.
pub(crate) fn sanitize_field_key(key: &str, strip: bool) -> Result<String, IntakeError> {
    let cleaned = if strip {
        strip_control_chars(key)
    } else {
        key.to_string()
    };
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::EmptyFieldKey);
    }
    Ok(trimmed.to_string())
}

/// Build the metadata document stored alongside a profile vector.
///
/// The downstream index only accepts strings, numbers, booleans, and lists
/// of strings as metadata values:
/// - explicit nulls are dropped,
/// - lists pass through as lists of strings,
/// - scalars pass through unchanged.
///
/// `extras` are appended after the profile fields and win on key collision
/// (e.g. `saved_at`, `schema_version` stamped by the caller).
pub fn sanitize_metadata(profile: &ProfileRecord, extras: &[(&str, Value)]) -> Value {
    let mut out = Map::new();
    for (key, value) in profile.iter() {
        match value {
            FieldValue::Null => continue,
            FieldValue::Flag(b) => {
                out.insert(key.clone(), Value::Bool(*b));
            }
            FieldValue::Number(n) => {
                out.insert(key.clone(), serde_json::json!(n));
            }
            FieldValue::Text(s) => {
                out.insert(key.clone(), Value::String(s.clone()));
            }
            FieldValue::List(items) => {
                let list = items.iter().cloned().map(Value::String).collect();
                out.insert(key.clone(), Value::Array(list));
            }
        }
    }
    for (key, value) in extras {
        if value.is_null() {
            continue;
        }
        out.insert((*key).to_string(), value.clone());
    }
    Value::Object(out)
}
