//! Pipeline state: the working table plus the outcome of the last operation.
//!
//! Operations consume a state and return a new one. A failed operation hands
//! back the input table untouched with an error status, so callers always get
//! a table and a message.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PrepError};
use crate::export;
use crate::table::Table;
use crate::transform::{Operation, Report, TransformEngine};

/// Severity of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    /// The operation ran but the result is degenerate.
    Warning,
    Error,
}

/// Outcome of the most recently attempted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub level: StatusLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            kind: None,
            message: message.into(),
            report: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            ..Self::success(message)
        }
    }

    pub fn error(error: &PrepError) -> Self {
        Self {
            level: StatusLevel::Error,
            kind: Some(error.kind()),
            message: error.to_string(),
            report: None,
        }
    }

    pub fn with_report(mut self, report: Option<Report>) -> Self {
        self.report = report;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success("Ready")
    }
}

/// The table a user is working on and the status of the last operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub table: Table,
    pub status: Status,
}

impl PipelineState {
    /// Start a pipeline from a cleaned table.
    pub fn new(table: Table) -> Self {
        let message = format!(
            "Loaded {} rows and {} columns",
            table.row_count(),
            table.column_count()
        );
        Self {
            table,
            status: Status::success(message),
        }
    }

    /// Apply an operation, producing the next state.
    ///
    /// Errors never escape: they become an error status over the unchanged table.
    pub fn apply(self, operation: &Operation) -> PipelineState {
        match TransformEngine::new().apply(&self.table, operation) {
            Ok(outcome) => {
                let status = if outcome.vacuous {
                    tracing::warn!(message = %outcome.message, "operation had no useful effect");
                    Status::warning(outcome.message)
                } else {
                    Status::success(outcome.message)
                };
                PipelineState {
                    table: outcome.table,
                    status: status.with_report(outcome.report),
                }
            }
            Err(error) => {
                tracing::debug!(%error, "operation rejected");
                PipelineState {
                    table: self.table,
                    status: Status::error(&error),
                }
            }
        }
    }

    /// Apply an operation given as JSON. Malformed operations are parameter errors.
    pub fn apply_json(self, operation: serde_json::Value) -> PipelineState {
        match serde_json::from_value::<Operation>(operation) {
            Ok(op) => self.apply(&op),
            Err(e) => PipelineState {
                table: self.table,
                status: Status::error(&PrepError::Parameter(format!("Invalid operation: {}", e))),
            },
        }
    }

    /// Column names, for populating selection lists.
    pub fn list_columns(&self) -> Vec<String> {
        self.table.column_names()
    }

    /// The working table as CSV bytes.
    pub fn export_csv(&self) -> crate::error::Result<Vec<u8>> {
        export::to_csv(&self.table)
    }
}
