//! surveyprep: canonicalization and interactive preprocessing for survey data.
//!
//! An uploaded survey file is decoded, parsed and cleaned once: free-text
//! answers are mapped onto closed vocabularies, impossible values become
//! missing, and columns get their canonical types. The cleaned table then
//! seeds a [`PipelineState`] that preprocessing operations transform one
//! step at a time.
//!
//! # Core Principles
//!
//! - **Rules are data**: every canonicalized column is described by a rule table
//! - **Explicit state**: operations consume a state and return the next one
//! - **Errors are statuses**: a failed operation leaves the table untouched
//!
//! Normalization and encoding are fit on every row, and [`Operation::Split`]
//! only reports partitions. Statistics computed before a split therefore see
//! the test rows.
//!
//! # Example
//!
//! ```no_run
//! use surveyprep::{Operation, SurveyPrep};
//! use surveyprep::transform::NormalizeMethod;
//!
//! let (state, _source) = SurveyPrep::new().ingest_file("survey.csv").unwrap();
//! let state = state.apply(&Operation::Normalize {
//!     method: Some(NormalizeMethod::Zscore),
//! });
//! println!("{}", state.status.message);
//! ```

pub mod cleaning;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod profile;
pub mod table;
pub mod transform;

mod prep;

pub use crate::prep::{PrepConfig, SurveyPrep};
pub use error::{ErrorKind, PrepError, Result};
pub use input::{DataTable, ParserConfig, SourceMetadata};
pub use pipeline::{PipelineState, Status, StatusLevel};
pub use table::{Column, ColumnType, Table, TargetType, Value};
pub use transform::{Operation, Outcome, Report};
