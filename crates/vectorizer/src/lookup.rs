//! Token embedding lookup.
//!
//! The lookup is an external collaborator from the aggregator's point of
//! view: loaded once, never mutated, safe for concurrent reads. Training
//! the underlying model is out of scope; [`WordVectorTable`] consumes the
//! plain-text export format that word2vec and GloVe tooling produce.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::VectorizerError;

/// Read-only token → vector lookup of a fixed dimension.
///
/// Implementations must be safe for concurrent read access; the pipeline
/// shares one lookup across all requests for the process lifetime.
pub trait EmbeddingLookup: Send + Sync + std::fmt::Debug {
    /// The vector for a normalized token, or `None` when the token is out
    /// of vocabulary.
    fn vector_for_token(&self, token: &str) -> Option<Cow<'_, [f32]>>;

    /// Dimension `D` of every vector this lookup returns.
    fn dimension(&self) -> usize;
}

/// In-memory word-vector table parsed from the word2vec/GloVe text format:
/// one `token v1 v2 … vD` row per line, optionally preceded by a
/// `vocab_count dimension` header line.
#[derive(Debug, Clone)]
pub struct WordVectorTable {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVectorTable {
    /// Build a table from explicit (token, vector) pairs. Intended for
    /// tests that need a controlled vocabulary.
    pub fn from_pairs<I, S>(dimension: usize, pairs: I) -> Result<Self, VectorizerError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if dimension == 0 {
            return Err(VectorizerError::InvalidDimension);
        }
        let mut vectors = HashMap::new();
        for (line, (token, vector)) in pairs.into_iter().enumerate() {
            if vector.len() != dimension {
                return Err(VectorizerError::DimensionMismatch {
                    line: line + 1,
                    expected: dimension,
                    found: vector.len(),
                });
            }
            vectors.insert(token.into(), vector);
        }
        Ok(Self { dimension, vectors })
    }

    /// Parse a table from a reader over the text export format.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VectorizerError> {
        let mut dimension: Option<usize> = None;
        let mut vectors = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let Some(first) = parts.next() else {
                continue;
            };
            let rest: Vec<&str> = parts.collect();

            // A leading `vocab_count dimension` header is optional in the
            // word2vec text format.
            if vectors.is_empty() && dimension.is_none() && rest.len() == 1 {
                if let (Ok(_count), Ok(dim)) = (first.parse::<usize>(), rest[0].parse::<usize>()) {
                    if dim == 0 {
                        return Err(VectorizerError::MalformedTable {
                            line: line_no,
                            message: "header declares dimension 0".into(),
                        });
                    }
                    dimension = Some(dim);
                    continue;
                }
            }

            if rest.is_empty() {
                return Err(VectorizerError::MalformedTable {
                    line: line_no,
                    message: "row has a token but no vector components".into(),
                });
            }

            let mut vector = Vec::with_capacity(rest.len());
            for component in &rest {
                let value: f32 =
                    component
                        .parse()
                        .map_err(|_| VectorizerError::MalformedTable {
                            line: line_no,
                            message: format!("'{component}' is not a float"),
                        })?;
                vector.push(value);
            }

            match dimension {
                Some(expected) if vector.len() != expected => {
                    return Err(VectorizerError::DimensionMismatch {
                        line: line_no,
                        expected,
                        found: vector.len(),
                    });
                }
                Some(_) => {}
                None => dimension = Some(vector.len()),
            }

            vectors.insert(first.to_string(), vector);
        }

        match dimension {
            Some(dimension) if !vectors.is_empty() => Ok(Self { dimension, vectors }),
            _ => Err(VectorizerError::EmptyTable),
        }
    }

    /// Load a table from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VectorizerError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.vectors.contains_key(token)
    }
}

impl EmbeddingLookup for WordVectorTable {
    fn vector_for_token(&self, token: &str) -> Option<Cow<'_, [f32]>> {
        self.vectors
            .get(token)
            .map(|v| Cow::Borrowed(v.as_slice()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_without_header() {
        let table =
            WordVectorTable::from_reader(Cursor::new("python 1.0 0.0\nrust 0.0 1.0\n")).unwrap();
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.vector_for_token("python").unwrap().as_ref(),
            &[1.0, 0.0]
        );
        assert!(table.vector_for_token("cobol").is_none());
    }

    #[test]
    fn parses_word2vec_header() {
        let table = WordVectorTable::from_reader(Cursor::new("2 3\na 1 2 3\nb 4 5 6\n")).unwrap();
        assert_eq!(table.dimension(), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = WordVectorTable::from_reader(Cursor::new("a 1.0 2.0\nb 1.0\n")).unwrap_err();
        assert!(matches!(
            err,
            VectorizerError::DimensionMismatch {
                line: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_header_dimension_violations() {
        let err = WordVectorTable::from_reader(Cursor::new("1 4\na 1 2\n")).unwrap_err();
        assert!(matches!(
            err,
            VectorizerError::DimensionMismatch {
                expected: 4,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_numeric_components() {
        let err = WordVectorTable::from_reader(Cursor::new("a 1.0 oops\n")).unwrap_err();
        assert!(matches!(err, VectorizerError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = WordVectorTable::from_reader(Cursor::new("\n\n")).unwrap_err();
        assert!(matches!(err, VectorizerError::EmptyTable));

        // A header alone is not a table either.
        let err = WordVectorTable::from_reader(Cursor::new("100 50\n")).unwrap_err();
        assert!(matches!(err, VectorizerError::EmptyTable));
    }

    #[test]
    fn token_only_row_is_malformed() {
        let err = WordVectorTable::from_reader(Cursor::new("a 1.0\nb\n")).unwrap_err();
        assert!(matches!(err, VectorizerError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn from_pairs_checks_dimension() {
        let err =
            WordVectorTable::from_pairs(2, vec![("a", vec![1.0]), ("b", vec![1.0, 2.0])])
                .unwrap_err();
        assert!(matches!(err, VectorizerError::DimensionMismatch { .. }));
    }

    #[test]
    fn loads_from_disk() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "remote 0.5 0.5").unwrap();
        let table = WordVectorTable::from_path(file.path()).unwrap();
        assert!(table.contains("remote"));
    }
}
