//! YAML deployment configuration for the provec pipeline.
//!
//! A single file describes every stage: intake limits, the field weight
//! table, the embedding source, and matcher defaults. The server loads one
//! of these when `pipeline_config` is set; library consumers can load it
//! directly.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! intake:
//!   strip_control_chars: true
//!   max_fields: 64
//!
//! field_specs:
//!   - { key: skills, weight: 1.0 }
//!   - { key: location, weight: 0.4 }
//!
//! embedding:
//!   mode: "table"
//!   table_path: "models/profile_vectors.txt"
//!
//! matcher:
//!   max_results: 10
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use intake::IntakeConfig;
use matcher::MatchConfig;
use vectorizer::{EmbeddingLookup, FieldSpecList, HashedStubLookup, VectorizerError, WordVectorTable};

/// Errors that can occur when loading pipeline configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("failed to load embedding table: {0}")]
    Table(#[from] VectorizerError),
}

/// Where token vectors come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSourceConfig {
    /// `"table"` loads a word-vector file; `"stub"` derives deterministic
    /// vectors from token hashes (no out-of-vocabulary behavior).
    #[serde(default = "default_embedding_mode")]
    pub mode: String,

    /// Path to a word2vec/GloVe text export. Required in `table` mode.
    #[serde(default)]
    pub table_path: Option<String>,

    /// Vector dimension used by the stub. A loaded table carries its own.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

impl EmbeddingSourceConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.mode.as_str() {
            "stub" => {
                if self.dimension == 0 {
                    return Err(ConfigLoadError::Validation(
                        "embedding.dimension must be >= 1".to_string(),
                    ));
                }
            }
            "table" => {
                if self.table_path.is_none() {
                    return Err(ConfigLoadError::Validation(
                        "embedding.table_path is required when mode is 'table'".to_string(),
                    ));
                }
            }
            other => {
                return Err(ConfigLoadError::Validation(format!(
                    "embedding.mode must be 'stub' or 'table', got '{other}'"
                )));
            }
        }
        Ok(())
    }

    /// Build the process-wide embedding lookup this config describes.
    pub fn build_lookup(&self) -> Result<Arc<dyn EmbeddingLookup>, ConfigLoadError> {
        self.validate()?;
        match (self.mode.as_str(), &self.table_path) {
            ("table", Some(path)) => Ok(Arc::new(WordVectorTable::from_path(path)?)),
            ("table", None) => Err(ConfigLoadError::Validation(
                "embedding.table_path is required when mode is 'table'".to_string(),
            )),
            _ => Ok(Arc::new(HashedStubLookup::new(self.dimension))),
        }
    }
}

impl Default for EmbeddingSourceConfig {
    fn default() -> Self {
        Self {
            mode: default_embedding_mode(),
            table_path: None,
            dimension: default_dimension(),
        }
    }
}

/// Top-level YAML configuration for the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvecConfig {
    /// Configuration format version
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Intake stage configuration
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Field weight table
    #[serde(default)]
    pub field_specs: FieldSpecList,

    /// Embedding source
    #[serde(default)]
    pub embedding: EmbeddingSourceConfig,

    /// Matcher defaults
    #[serde(default)]
    pub matcher: MatchConfig,
}

impl ProvecConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ProvecConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        self.field_specs
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.embedding.validate()?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        Ok(())
    }
}

impl Default for ProvecConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            name: None,
            intake: IntakeConfig::default(),
            field_specs: FieldSpecList::default(),
            embedding: EmbeddingSourceConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}

fn default_embedding_mode() -> String {
    "stub".to_string()
}

fn default_dimension() -> usize {
    100
}
