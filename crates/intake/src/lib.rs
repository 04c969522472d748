//! Profile intake layer.
//!
//! This is where profiles enter the pipeline. We take a raw submission
//! (typically deserialized straight from the form layer's JSON), run it
//! through validation, and hand downstream stages a canonical record they
//! can trust.
//!
//! ## What we do here
//!
//! - **Validate ids and keys** - non-empty after trimming, control
//!   characters stripped
//! - **Enforce limits** - field count, text size, list length
//! - **Drop explicit nulls** - a `null` field carries the same information
//!   as an absent one, so it does not survive intake
//! - **Default timestamps** - `saved_at` falls back to intake time
//! - **Log everything** - structured logs via tracing
//!
//! ## Main entry point
//!
//! Call [`intake`] with a [`ProfileSubmission`] and [`IntakeConfig`], get
//! back a [`CanonicalProfile`]. Errors are typed so callers can map them to
//! user-facing responses.
//!
//! ```
//! use intake::{intake, IntakeConfig, ProfileRecord, ProfileSubmission};
//!
//! let mut profile = ProfileRecord::new();
//! profile.insert("skills", vec!["Rust".to_string(), "Go".to_string()]);
//!
//! let canonical = intake(ProfileSubmission::new(profile), &IntakeConfig::default()).unwrap();
//! assert_eq!(canonical.profile.len(), 1);
//! ```

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn, Level};

mod config;
mod error;
mod metadata;
mod record;

pub use crate::config::IntakeConfig;
pub use crate::error::IntakeError;
pub use crate::metadata::sanitize_metadata;
pub use crate::record::{CanonicalProfile, FieldValue, ProfileRecord, ProfileSubmission};

use crate::metadata::{sanitize_field_key, sanitize_submission_id};

/// Validate and normalize a raw submission into a [`CanonicalProfile`].
pub fn intake(
    raw: ProfileSubmission,
    cfg: &IntakeConfig,
) -> Result<CanonicalProfile, IntakeError> {
    let start = Instant::now();
    let ProfileSubmission {
        id,
        profile,
        saved_at,
        schema_version,
    } = raw;

    let submission_id = match sanitize_submission_id(id, cfg.strip_control_chars) {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros() as u64, "intake_failure");
            return Err(err);
        }
    };

    let span = tracing::span!(Level::INFO, "intake.intake", submission_id = %submission_id);
    let _guard = span.enter();

    match normalize_profile(profile, cfg) {
        Ok(profile) => {
            let record = CanonicalProfile {
                submission_id,
                profile,
                saved_at: saved_at.unwrap_or_else(Utc::now),
                schema_version,
            };
            info!(
                field_count = record.profile.len(),
                elapsed_micros = start.elapsed().as_micros() as u64,
                "intake_success"
            );
            Ok(record)
        }
        Err(err) => {
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros() as u64, "intake_failure");
            Err(err)
        }
    }
}

fn normalize_profile(
    profile: ProfileRecord,
    cfg: &IntakeConfig,
) -> Result<ProfileRecord, IntakeError> {
    if profile.len() > cfg.max_fields {
        return Err(IntakeError::TooManyFields {
            count: profile.len(),
            limit: cfg.max_fields,
        });
    }

    let mut normalized = ProfileRecord::new();
    for (key, value) in profile.iter() {
        if value.is_null() {
            continue;
        }
        let key = sanitize_field_key(key, cfg.strip_control_chars)?;
        check_value_limits(&key, value, cfg)?;
        normalized.insert(key, value.clone());
    }
    Ok(normalized)
}

fn check_value_limits(
    key: &str,
    value: &FieldValue,
    cfg: &IntakeConfig,
) -> Result<(), IntakeError> {
    match value {
        FieldValue::Text(text) => {
            if text.len() > cfg.max_field_text_bytes {
                return Err(IntakeError::FieldTooLarge {
                    key: key.to_string(),
                    len: text.len(),
                    limit: cfg.max_field_text_bytes,
                });
            }
        }
        FieldValue::List(items) => {
            if items.len() > cfg.max_list_items {
                return Err(IntakeError::ListTooLong {
                    key: key.to_string(),
                    count: items.len(),
                    limit: cfg.max_list_items,
                });
            }
            for item in items {
                if item.len() > cfg.max_field_text_bytes {
                    return Err(IntakeError::FieldTooLarge {
                        key: key.to_string(),
                        len: item.len(),
                        limit: cfg.max_field_text_bytes,
                    });
                }
            }
        }
        FieldValue::Null | FieldValue::Flag(_) | FieldValue::Number(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(profile: ProfileRecord) -> ProfileSubmission {
        ProfileSubmission {
            id: "sub-1".into(),
            profile,
            saved_at: None,
            schema_version: Some("v1".into()),
        }
    }

    #[test]
    fn intake_defaults_saved_at_and_keeps_fields() {
        let mut profile = ProfileRecord::new();
        profile.insert("role", "data engineer");
        profile.insert("experience", 4.0);

        let before = Utc::now();
        let canonical = intake(submission(profile), &IntakeConfig::default()).unwrap();

        assert_eq!(canonical.submission_id, "sub-1");
        assert_eq!(canonical.profile.len(), 2);
        assert!(canonical.saved_at >= before);
        assert_eq!(canonical.schema_version.as_deref(), Some("v1"));
    }

    #[test]
    fn intake_drops_explicit_nulls() {
        let mut profile = ProfileRecord::new();
        profile.insert("role", "designer");
        profile.insert("location", FieldValue::Null);

        let canonical = intake(submission(profile), &IntakeConfig::default()).unwrap();
        assert_eq!(canonical.profile.len(), 1);
        assert!(canonical.profile.get("location").is_none());
    }

    #[test]
    fn intake_rejects_blank_id() {
        let raw = ProfileSubmission {
            id: "   ".into(),
            profile: ProfileRecord::new(),
            saved_at: None,
            schema_version: None,
        };
        let err = intake(raw, &IntakeConfig::default()).unwrap_err();
        assert_eq!(err, IntakeError::MissingSubmissionId);
    }

    #[test]
    fn intake_rejects_empty_field_key() {
        let mut profile = ProfileRecord::new();
        profile.insert("  ", "value");

        let err = intake(submission(profile), &IntakeConfig::default()).unwrap_err();
        assert_eq!(err, IntakeError::EmptyFieldKey);
    }

    #[test]
    fn intake_enforces_field_count_limit() {
        let cfg = IntakeConfig {
            max_fields: 1,
            ..Default::default()
        };
        let mut profile = ProfileRecord::new();
        profile.insert("a", "1");
        profile.insert("b", "2");

        let err = intake(submission(profile), &cfg).unwrap_err();
        assert_eq!(
            err,
            IntakeError::TooManyFields {
                count: 2,
                limit: 1
            }
        );
    }

    #[test]
    fn intake_enforces_text_and_list_limits() {
        let cfg = IntakeConfig {
            max_field_text_bytes: 4,
            max_list_items: 2,
            ..Default::default()
        };

        let mut oversized_text = ProfileRecord::new();
        oversized_text.insert("bio", "much too long");
        assert!(matches!(
            intake(submission(oversized_text), &cfg),
            Err(IntakeError::FieldTooLarge { .. })
        ));

        let mut oversized_list = ProfileRecord::new();
        oversized_list.insert(
            "skills",
            FieldValue::List(vec!["a".into(), "b".into(), "c".into()]),
        );
        assert!(matches!(
            intake(submission(oversized_list), &cfg),
            Err(IntakeError::ListTooLong { .. })
        ));

        let mut oversized_item = ProfileRecord::new();
        oversized_item.insert("skills", FieldValue::List(vec!["toolong".into()]));
        assert!(matches!(
            intake(submission(oversized_item), &cfg),
            Err(IntakeError::FieldTooLarge { .. })
        ));
    }

    #[test]
    fn intake_trims_field_keys() {
        let mut profile = ProfileRecord::new();
        profile.insert(" role ", "engineer");

        let canonical = intake(submission(profile), &IntakeConfig::default()).unwrap();
        assert!(canonical.profile.get("role").is_some());
    }
}
