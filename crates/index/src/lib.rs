//! # Profile Index
//!
//! Stores profile vectors with their metadata and answers "who is similar
//! to this vector" queries with cosine similarity over f32 vectors.
//!
//! The index is the thin local stand-in for the managed vector store the
//! service talks to in production, so it deliberately stays small:
//!
//! - **Pluggable backends** through the [`IndexBackend`] trait, with an
//!   in-memory `HashMap` backend out of the box.
//! - **Typed records**: [`IndexRecord`] carries the profile id, the raw
//!   vector, and a sanitized metadata document.
//! - **Deterministic search**: results sort by descending score with ties
//!   broken by profile id.
//!
//! Approximate-nearest-neighbor structures, sharding, quantization, and
//! on-disk formats are out of scope here.
//!
//! ```
//! use index::{IndexConfig, IndexRecord, ProfileIndex, INDEX_SCHEMA_VERSION};
//! use serde_json::json;
//!
//! let index = ProfileIndex::new(IndexConfig::default()).unwrap();
//! index
//!     .upsert(&IndexRecord {
//!         schema_version: INDEX_SCHEMA_VERSION,
//!         profile_id: "user_1".into(),
//!         vector: vec![1.0, 0.0],
//!         metadata: json!({ "role": "engineer" }),
//!     })
//!     .unwrap();
//!
//! let hits = index.search(&[1.0, 0.0], 5, None).unwrap();
//! assert_eq!(hits[0].profile_id, "user_1");
//! ```

mod backend;
mod query;

pub use backend::{BackendConfig, InMemoryBackend, IndexBackend};
pub use query::QueryResult;

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;

/// Bump this value whenever the stored `IndexRecord` layout changes.
pub const INDEX_SCHEMA_VERSION: u16 = 1;

mod metadata_serde {
    use serde::de::Error as DeError;
    use serde::ser::Error as SerError;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub(super) fn serialize<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = serde_json::to_vec(value).map_err(SerError::custom)?;
        serializer.serialize_bytes(&bytes)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        serde_json::from_slice(&bytes).map_err(DeError::custom)
    }
}

/// One stored profile: id, vector, and sanitized metadata.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IndexRecord {
    /// Schema version for backward compatibility when deserializing.
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    /// Identifier the record is stored under.
    pub profile_id: String,
    /// The profile vector, dimension fixed per index.
    pub vector: Vec<f32>,
    /// Arbitrary metadata associated with the profile (JSON).
    #[serde(with = "metadata_serde")]
    pub metadata: serde_json::Value,
}

const fn default_schema_version() -> u16 {
    INDEX_SCHEMA_VERSION
}

/// Errors surfaced by the index.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IndexError {
    #[error("index backend failure: {0}")]
    Backend(String),

    #[error("failed to encode index record: {0}")]
    Encode(String),

    #[error("failed to decode index record: {0}")]
    Decode(String),

    #[error("vector dimension {found} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("index record requires a non-empty profile_id")]
    MissingProfileId,

    #[error("index record requires a non-empty vector")]
    EmptyVector,
}

impl IndexError {
    pub fn backend(message: impl Into<String>) -> Self {
        IndexError::Backend(message.into())
    }
}

/// Runtime configuration for a [`ProfileIndex`].
#[derive(Clone, Debug, Default)]
pub struct IndexConfig {
    /// Which backend stores record bytes.
    pub backend: BackendConfig,
    /// Expected vector dimension. When `None`, the first upserted record
    /// pins it.
    pub dimension: Option<usize>,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

/// The profile vector index.
pub struct ProfileIndex {
    backend: Box<dyn IndexBackend>,
    // Pinned on first upsert when the config does not declare one. Every
    // later upsert and query must match it.
    dimension: RwLock<Option<usize>>,
}

impl ProfileIndex {
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        let backend = config.backend.build()?;
        Ok(Self {
            backend,
            dimension: RwLock::new(config.dimension),
        })
    }

    /// The index dimension, once known.
    pub fn dimension(&self) -> Option<usize> {
        *self
            .dimension
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_dimension(&self, found: usize) -> Result<(), IndexError> {
        let mut guard = self
            .dimension
            .write()
            .map_err(|_| IndexError::backend("poisoned dimension lock"))?;
        match *guard {
            Some(expected) if expected != found => {
                Err(IndexError::DimensionMismatch { expected, found })
            }
            Some(_) => Ok(()),
            None => {
                *guard = Some(found);
                Ok(())
            }
        }
    }

    /// Insert or replace a record keyed by its profile id.
    pub fn upsert(&self, record: &IndexRecord) -> Result<(), IndexError> {
        if record.profile_id.trim().is_empty() {
            return Err(IndexError::MissingProfileId);
        }
        if record.vector.is_empty() {
            return Err(IndexError::EmptyVector);
        }
        self.check_dimension(record.vector.len())?;

        let bytes = self.encode_record(record)?;
        self.backend.put(&record.profile_id, &bytes)?;
        log::debug!(
            "upserted profile {} ({} dims)",
            record.profile_id,
            record.vector.len()
        );
        Ok(())
    }

    /// Insert or replace several records under one backend batch.
    pub fn upsert_batch(&self, records: &[IndexRecord]) -> Result<(), IndexError> {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            if record.profile_id.trim().is_empty() {
                return Err(IndexError::MissingProfileId);
            }
            if record.vector.is_empty() {
                return Err(IndexError::EmptyVector);
            }
            self.check_dimension(record.vector.len())?;
            entries.push((record.profile_id.clone(), self.encode_record(record)?));
        }
        self.backend.batch_put(entries)
    }

    /// Fetch a stored record by profile id.
    pub fn get(&self, profile_id: &str) -> Result<Option<IndexRecord>, IndexError> {
        match self.backend.get(profile_id)? {
            Some(bytes) => Ok(Some(self.decode_record(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Remove a record. Removing an unknown id is not an error.
    pub fn delete(&self, profile_id: &str) -> Result<(), IndexError> {
        self.backend.delete(profile_id)
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, IndexError> {
        let mut count = 0usize;
        self.backend.scan(&mut |_bytes| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.len()? == 0)
    }

    pub(crate) fn scan_records(
        &self,
        visitor: &mut dyn FnMut(IndexRecord) -> Result<(), IndexError>,
    ) -> Result<(), IndexError> {
        self.backend.scan(&mut |bytes| {
            let record = self.decode_record(bytes)?;
            visitor(record)
        })
    }

    fn encode_record(&self, record: &IndexRecord) -> Result<Vec<u8>, IndexError> {
        encode_to_vec(record, standard()).map_err(|e| IndexError::Encode(e.to_string()))
    }

    fn decode_record(&self, bytes: &[u8]) -> Result<IndexRecord, IndexError> {
        let (record, _) =
            decode_from_slice(bytes, standard()).map_err(|e| IndexError::Decode(e.to_string()))?;
        Ok(record)
    }
}
