//! Weighted aggregation of per-field vectors into one profile vector.

use intake::{FieldValue, ProfileRecord};

use crate::embed::embed_text;
use crate::fields::FieldSpecList;
use crate::lookup::EmbeddingLookup;

/// Coerce a field value to the text that gets embedded.
///
/// Total over every value shape: lists join with a single space, scalars
/// stringify, explicit nulls coerce to `None` and are skipped exactly like
/// an absent field.
pub fn field_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Number(number) => Some(number.to_string()),
        FieldValue::Flag(flag) => Some(flag.to_string()),
        FieldValue::List(items) => Some(items.join(" ")),
    }
}

/// Build the single fixed-length vector representing a whole profile.
///
/// For each included field with a positive weight, in spec-list order:
/// fetch the field (absent or null skips it entirely), coerce to text,
/// embed, and accumulate `weight * field_vector`. The field's weight is
/// added to the running weight-sum even when the field vector is all
/// zeros: an all-out-of-vocabulary field still counts toward the
/// normalization denominator. Previously stored vectors depend on this, so
/// it must not be "fixed" to renormalize over successful fields only.
///
/// Returns `accumulator / weight_sum`, or the zero vector of the lookup's
/// dimension when no included field had a usable value. Never errors on
/// data shape; callers decide that an all-zero result is not meaningful.
pub fn compute_profile_vector<L>(
    profile: &ProfileRecord,
    field_specs: &FieldSpecList,
    lookup: &L,
) -> Vec<f32>
where
    L: EmbeddingLookup + ?Sized,
{
    let mut accumulator = vec![0f32; lookup.dimension()];
    let mut weight_sum = 0f32;

    for spec in field_specs.iter() {
        let Some(weight) = spec.effective_weight() else {
            continue;
        };
        let Some(value) = profile.get(&spec.key) else {
            continue;
        };
        let Some(text) = field_text(value) else {
            continue;
        };

        let field_vector = embed_text(&text, lookup);
        for (slot, component) in accumulator.iter_mut().zip(field_vector.iter()) {
            *slot += weight * component;
        }
        weight_sum += weight;
    }

    if weight_sum > 0.0 {
        let inv = 1.0 / weight_sum;
        for slot in accumulator.iter_mut() {
            *slot *= inv;
        }
    }
    accumulator
}
