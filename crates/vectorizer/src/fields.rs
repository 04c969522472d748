//! Field specifications: which profile fields participate in the vector
//! and how strongly.

use serde::{Deserialize, Serialize};

use crate::error::VectorizerError;

/// One entry of the field weight table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Profile field key this spec applies to.
    pub key: String,
    /// Whether the field participates at all.
    #[serde(default = "default_include")]
    pub include: bool,
    /// Relative importance. Zero or negative weights exclude the field
    /// just like `include: false`.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, weight: f32) -> Self {
        Self {
            key: key.into(),
            include: true,
            weight,
        }
    }

    /// The weight this field contributes, or `None` when the field is
    /// excluded (`include == false`, or a non-positive/non-finite weight).
    pub fn effective_weight(&self) -> Option<f32> {
        (self.include && self.weight.is_finite() && self.weight > 0.0).then_some(self.weight)
    }
}

fn default_include() -> bool {
    true
}

fn default_weight() -> f32 {
    1.0
}

/// Ordered list of field specs.
///
/// Order is irrelevant to the aggregation result (it is commutative) but
/// fixed so logs and serialized configs are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FieldSpecList {
    specs: Vec<FieldSpec>,
}

impl FieldSpecList {
    /// Build a validated list. Deserialized lists should go through
    /// [`validate`](Self::validate) before first use.
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self, VectorizerError> {
        let list = Self { specs };
        list.validate()?;
        Ok(list)
    }

    /// Reject duplicate keys and non-finite weights.
    pub fn validate(&self) -> Result<(), VectorizerError> {
        let mut seen = std::collections::HashSet::new();
        for spec in &self.specs {
            if spec.key.trim().is_empty() {
                return Err(VectorizerError::InvalidFieldSpecs(
                    "field spec has an empty key".into(),
                ));
            }
            if !seen.insert(spec.key.as_str()) {
                return Err(VectorizerError::InvalidFieldSpecs(format!(
                    "duplicate field spec key '{}'",
                    spec.key
                )));
            }
            if !spec.weight.is_finite() {
                return Err(VectorizerError::InvalidFieldSpecs(format!(
                    "field '{}' has a non-finite weight",
                    spec.key
                )));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for FieldSpecList {
    /// The stock profile schema: field keys and weights of the deployed
    /// matching service. A default deployment must keep these values so
    /// freshly computed vectors stay comparable with stored ones.
    fn default() -> Self {
        let specs = vec![
            FieldSpec::new("role", 0.9),
            FieldSpec::new("domain", 0.9),
            FieldSpec::new("industry_experience", 0.8),
            FieldSpec::new("skills", 1.0),
            FieldSpec::new("preferred_roles_in_projects", 0.9),
            FieldSpec::new("preferred_collaboration", 0.6),
            FieldSpec::new("availability_timeframe", 0.5),
            FieldSpec::new("experience", 0.7),
            FieldSpec::new("languages_spoken", 0.5),
            FieldSpec::new("certifications", 0.6),
            FieldSpec::new("offers", 0.7),
            FieldSpec::new("needs", 0.8),
            FieldSpec::new("interests_hobbies", 0.6),
            FieldSpec::new("one_line_bio", 0.7),
            FieldSpec::new("location", 0.4),
        ];
        Self { specs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_and_nonpositive_weights_contribute_nothing() {
        let included = FieldSpec::new("skills", 1.0);
        assert_eq!(included.effective_weight(), Some(1.0));

        let excluded = FieldSpec {
            include: false,
            ..FieldSpec::new("skills", 1.0)
        };
        assert_eq!(excluded.effective_weight(), None);

        assert_eq!(FieldSpec::new("skills", 0.0).effective_weight(), None);
        assert_eq!(FieldSpec::new("skills", -0.4).effective_weight(), None);
        assert_eq!(FieldSpec::new("skills", f32::NAN).effective_weight(), None);
    }

    #[test]
    fn default_schema_matches_deployed_weights() {
        let list = FieldSpecList::default();
        assert_eq!(list.len(), 15);
        list.validate().unwrap();

        let skills = list.iter().find(|s| s.key == "skills").unwrap();
        assert_eq!(skills.weight, 1.0);
        let location = list.iter().find(|s| s.key == "location").unwrap();
        assert_eq!(location.weight, 0.4);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = FieldSpecList::new(vec![
            FieldSpec::new("skills", 1.0),
            FieldSpec::new("skills", 0.5),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn non_finite_weights_rejected() {
        let err =
            FieldSpecList::new(vec![FieldSpec::new("skills", f32::INFINITY)]).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let list: FieldSpecList =
            serde_json::from_str(r#"[{"key": "skills"}, {"key": "location", "weight": 0.4}]"#)
                .unwrap();
        list.validate().unwrap();
        let skills = list.iter().next().unwrap();
        assert!(skills.include);
        assert_eq!(skills.weight, 1.0);
    }
}
