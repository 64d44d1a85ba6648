//! Error types for the surveyprep library.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for surveyprep operations.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Uploaded bytes could not be turned into a table.
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Operation references a missing column or a column of the wrong type.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Missing or out-of-range operation parameter.
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    /// Shorthand for a schema error about an unknown column.
    pub fn unknown_column(name: &str) -> Self {
        PrepError::Schema(format!("Column '{}' not found", name))
    }

    /// Classify the error for status reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrepError::Io { .. } | PrepError::Ingestion(_) | PrepError::Csv(_) => {
                ErrorKind::Ingestion
            }
            PrepError::Schema(_) => ErrorKind::Schema,
            PrepError::Parameter(_) => ErrorKind::Parameter,
            PrepError::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse error category carried in a pipeline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Ingestion,
    Schema,
    Parameter,
    Internal,
}

/// Result type alias for surveyprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;
