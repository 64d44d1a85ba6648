//! Preprocessing operations and the reports they produce.

use serde::{Deserialize, Serialize};

use crate::table::{ColumnType, Table, TargetType};

/// Column selector meaning "every column with a missing value".
pub const ALL_COLUMNS: &str = "*";

/// A preprocessing operation a user can apply to the working table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Remove the named columns.
    DropColumns { columns: Vec<String> },

    /// Impute or drop missing values in one column, or in all of them with `"*"`.
    HandleMissing {
        column: String,
        #[serde(default)]
        method: Option<MissingMethod>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_value: Option<String>,
    },

    /// Coerce a column to another type.
    ConvertType { column: String, target: TargetType },

    /// Bin a numeric column into equal-width intervals.
    Discretize { column: String, bin_count: i64 },

    /// Rescale every numeric column.
    Normalize {
        #[serde(default)]
        method: Option<NormalizeMethod>,
    },

    /// Encode every categorical or text column.
    Encode {
        #[serde(default)]
        method: Option<EncodeMethod>,
    },

    /// Report a seeded train/test partition.
    Split { test_fraction: f64, seed: u64 },
}

impl Operation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            Operation::DropColumns { columns } => {
                format!("Drop columns: {}", columns.join(", "))
            }
            Operation::HandleMissing { column, method, .. } => {
                let method = method.map(|m| m.to_string()).unwrap_or_else(|| "?".into());
                if column == ALL_COLUMNS {
                    format!("Handle missing values in all columns ({})", method)
                } else {
                    format!("Handle missing values in '{}' ({})", column, method)
                }
            }
            Operation::ConvertType { column, target } => {
                format!("Convert '{}' to {}", column, target)
            }
            Operation::Discretize { column, bin_count } => {
                format!("Discretize '{}' into {} bins", column, bin_count)
            }
            Operation::Normalize { method } => match method {
                Some(m) => format!("Normalize numeric columns ({})", m.as_str()),
                None => "Normalize numeric columns".to_string(),
            },
            Operation::Encode { method } => match method {
                Some(m) => format!("Encode categorical columns ({})", m.as_str()),
                None => "Encode categorical columns".to_string(),
            },
            Operation::Split {
                test_fraction,
                seed,
            } => format!("Split with test fraction {} (seed {})", test_fraction, seed),
        }
    }
}

/// How missing values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMethod {
    /// Remove rows where a target column is missing.
    Drop,
    Mean,
    Median,
    /// Smallest of the most frequent values.
    Mode,
    Zero,
    #[serde(alias = "forward_fill")]
    Ffill,
    #[serde(alias = "backward_fill")]
    Bfill,
    /// Fill with a user-supplied literal.
    Custom,
}

impl std::fmt::Display for MissingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MissingMethod::Drop => "drop",
            MissingMethod::Mean => "mean",
            MissingMethod::Median => "median",
            MissingMethod::Mode => "mode",
            MissingMethod::Zero => "zero",
            MissingMethod::Ffill => "ffill",
            MissingMethod::Bfill => "bfill",
            MissingMethod::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Scaling method for [`Operation::Normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMethod {
    #[serde(alias = "standard")]
    Zscore,
    #[serde(alias = "min_max")]
    Minmax,
}

impl NormalizeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeMethod::Zscore => "zscore",
            NormalizeMethod::Minmax => "minmax",
        }
    }
}

/// Encoding method for [`Operation::Encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeMethod {
    Label,
    #[serde(alias = "one_hot")]
    Onehot,
}

impl EncodeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeMethod::Label => "label",
            EncodeMethod::Onehot => "onehot",
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Structured by-product of a successful operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Drop(DropReport),
    Missing(MissingReport),
    Convert(ConvertReport),
    Discretize(DiscretizeReport),
    Normalize(ScalerParams),
    Encode(EncoderParams),
    Split(SplitReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropReport {
    pub dropped: Vec<String>,
    pub remaining: usize,
}

/// Outcome of a missing-value operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    pub method: MissingMethod,
    /// Missing cells in the whole table before the operation.
    pub missing_before: usize,
    /// Missing cells in the whole table after the operation.
    pub missing_after: usize,
    pub columns_processed: Vec<String>,
    /// Broadcast-mode columns the method does not apply to.
    pub columns_skipped: Vec<String>,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertReport {
    pub column: String,
    pub from: ColumnType,
    pub to: ColumnType,
    /// Cells that were present before and failed to parse.
    pub newly_missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizeReport {
    pub column: String,
    pub new_column: String,
    pub edges: Vec<f64>,
    pub labels: Vec<String>,
}

/// Per-column scaling parameters. Never stored in the pipeline state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub method: NormalizeMethod,
    pub columns: Vec<ColumnScale>,
}

/// `scaled = (value - offset) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScale {
    pub column: String,
    pub offset: f64,
    pub scale: f64,
}

/// Per-column category tables. Never stored in the pipeline state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderParams {
    pub method: EncodeMethod,
    pub columns: Vec<ColumnCategories>,
}

/// Sorted categories of one column; a category's code is its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCategories {
    pub column: String,
    pub categories: Vec<String>,
    /// Indicator columns created by one-hot encoding.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<String>,
}

/// Row counts and membership of a seeded partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitReport {
    pub test_fraction: f64,
    pub seed: u64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Row identifiers in the training partition, in shuffled order.
    pub train_index: Vec<i64>,
    /// Row identifiers in the test partition, in shuffled order.
    pub test_index: Vec<i64>,
}

/// Result of applying one operation to a table.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The resulting table. Equal to the input when nothing applied.
    pub table: Table,
    pub report: Option<Report>,
    pub message: String,
    /// Set when the operation ran but the result is degenerate.
    pub vacuous: bool,
}

impl Outcome {
    pub fn new(table: Table, report: Report, message: impl Into<String>) -> Self {
        Self {
            table,
            report: Some(report),
            message: message.into(),
            vacuous: false,
        }
    }

    /// A degenerate result: the operation ran but did nothing useful.
    pub fn vacuous(table: Table, message: impl Into<String>) -> Self {
        Self {
            table,
            report: None,
            message: message.into(),
            vacuous: true,
        }
    }

    pub fn flag_vacuous(mut self) -> Self {
        self.vacuous = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wire_names() {
        let op: Operation = serde_json::from_str(
            r#"{"op": "handle_missing", "column": "*", "method": "ffill"}"#,
        )
        .unwrap();
        assert_eq!(
            op,
            Operation::HandleMissing {
                column: "*".into(),
                method: Some(MissingMethod::Ffill),
                custom_value: None,
            }
        );

        let op: Operation =
            serde_json::from_str(r#"{"op": "convert_type", "column": "Age", "target": "float"}"#)
                .unwrap();
        assert!(matches!(op, Operation::ConvertType { target: TargetType::Float, .. }));

        let op: Operation = serde_json::from_str(r#"{"op": "normalize"}"#).unwrap();
        assert_eq!(op, Operation::Normalize { method: None });
    }

    #[test]
    fn test_description() {
        let op = Operation::Discretize {
            column: "Age".into(),
            bin_count: 5,
        };
        assert_eq!(op.description(), "Discretize 'Age' into 5 bins");
    }
}
