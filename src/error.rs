//! Error kinds surfaced by the transform.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// The input could not be read from disk.
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("malformed input: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The input is valid JSON but not the expected aggregation shape.
    #[error("unexpected document structure: {0}")]
    Structure(#[source] serde_json::Error),

    /// A bucket key cannot be represented as a UTC date.
    #[error("bucket key {0} is not a representable timestamp")]
    TimestampOutOfRange(i64),

    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The output location could not be written.
    #[error("failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    /// Sorts a `serde_json` decode failure into malformed JSON versus a
    /// well-formed document of the wrong shape.
    pub fn from_decode(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => TransformError::Structure(err),
            Category::Syntax | Category::Eof | Category::Io => TransformError::Malformed(err),
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TransformError::Structure(_) | TransformError::TimestampOutOfRange(_)
        )
    }
}
