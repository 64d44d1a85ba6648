//! Dispatches preprocessing operations to their implementations.

use crate::cleaning::coerce_column;
use crate::error::{PrepError, Result};
use crate::table::{Table, TargetType};

use super::discretize::discretize;
use super::encode::encode;
use super::missing::{MissingTarget, handle_missing};
use super::normalize::normalize;
use super::operations::{ConvertReport, DropReport, Operation, Outcome, Report};
use super::split::split;

/// Engine for applying preprocessing operations to a table.
///
/// Every operation reads the table and builds a new one; the input is never
/// modified, so a failed operation leaves the caller's table as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply one operation.
    pub fn apply(&self, table: &Table, operation: &Operation) -> Result<Outcome> {
        tracing::debug!(operation = %operation.description(), "applying operation");

        match operation {
            Operation::DropColumns { columns } => self.drop_columns(table, columns),
            Operation::HandleMissing {
                column,
                method,
                custom_value,
            } => {
                let method = method.ok_or_else(|| {
                    PrepError::Parameter("No missing-value method selected".to_string())
                })?;
                handle_missing(
                    table,
                    &MissingTarget::parse(column),
                    method,
                    custom_value.as_deref(),
                )
            }
            Operation::ConvertType { column, target } => self.convert_type(table, column, *target),
            Operation::Discretize { column, bin_count } => discretize(table, column, *bin_count),
            Operation::Normalize { method } => {
                let method = method.ok_or_else(|| {
                    PrepError::Parameter("No normalization method selected".to_string())
                })?;
                Ok(normalize(table, method))
            }
            Operation::Encode { method } => {
                let method = method.ok_or_else(|| {
                    PrepError::Parameter("No encoding method selected".to_string())
                })?;
                encode(table, method)
            }
            Operation::Split {
                test_fraction,
                seed,
            } => split(table, *test_fraction, *seed),
        }
    }

    /// Remove columns. Every name must exist.
    fn drop_columns(&self, table: &Table, columns: &[String]) -> Result<Outcome> {
        if columns.is_empty() {
            return Err(PrepError::Parameter(
                "Select at least one column to drop".to_string(),
            ));
        }
        for name in columns {
            table.require(name)?;
        }

        let mut result = table.clone();
        for name in columns {
            result.remove_column(name);
        }

        let message = format!("Dropped columns: {}", columns.join(", "));
        let remaining = result.column_count();
        Ok(Outcome::new(
            result,
            Report::Drop(DropReport {
                dropped: columns.to_vec(),
                remaining,
            }),
            message,
        ))
    }

    /// Coerce one column to `target`.
    fn convert_type(&self, table: &Table, column: &str, target: TargetType) -> Result<Outcome> {
        let source = table.require(column)?;
        let converted = coerce_column(source, target);
        let newly_missing = converted.missing_count().saturating_sub(source.missing_count());
        let report = ConvertReport {
            column: column.to_string(),
            from: source.kind,
            to: converted.kind,
            newly_missing,
        };

        let mut result = table.clone();
        result.insert_column(converted)?;

        let mut message = format!("Converted '{}' to {}", column, target);
        if newly_missing > 0 {
            message.push_str(&format!(
                " ({} value(s) could not be parsed and became missing)",
                newly_missing
            ));
        }
        Ok(Outcome::new(result, Report::Convert(report), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType, Value};
    use crate::transform::MissingMethod;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::integer("Age", vec![Value::Int(30), Value::Missing]),
            Column::new(
                "Gender",
                ColumnType::Categorical,
                vec![Value::text("Male"), Value::text("Female")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_drop_columns() {
        let engine = TransformEngine::new();
        let op = Operation::DropColumns {
            columns: vec!["Gender".into()],
        };
        let out = engine.apply(&table(), &op).unwrap();
        assert_eq!(out.table.column_names(), vec!["Age"]);
    }

    #[test]
    fn test_drop_columns_validation() {
        let engine = TransformEngine::new();
        let empty = Operation::DropColumns { columns: vec![] };
        assert!(matches!(
            engine.apply(&table(), &empty),
            Err(PrepError::Parameter(_))
        ));

        let unknown = Operation::DropColumns {
            columns: vec!["Age".into(), "Salary".into()],
        };
        assert!(matches!(
            engine.apply(&table(), &unknown),
            Err(PrepError::Schema(_))
        ));
    }

    #[test]
    fn test_missing_method_required() {
        let op = Operation::HandleMissing {
            column: "Age".into(),
            method: None,
            custom_value: None,
        };
        assert!(matches!(
            TransformEngine::new().apply(&table(), &op),
            Err(PrepError::Parameter(_))
        ));

        let op = Operation::HandleMissing {
            column: "Age".into(),
            method: Some(MissingMethod::Zero),
            custom_value: None,
        };
        assert!(TransformEngine::new().apply(&table(), &op).is_ok());
    }

    #[test]
    fn test_convert_reports_parse_failures() {
        let op = Operation::ConvertType {
            column: "Gender".into(),
            target: TargetType::Float,
        };
        let out = TransformEngine::new().apply(&table(), &op).unwrap();
        let Some(Report::Convert(report)) = out.report else {
            panic!("expected a convert report");
        };
        assert_eq!(report.newly_missing, 2);
        assert_eq!(report.to, ColumnType::Float);
    }
}
