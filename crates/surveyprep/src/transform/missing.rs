//! Missing-value imputation and row dropping.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::error::{PrepError, Result};
use crate::table::{
    Column, ColumnType, Table, Value, parse_bool, parse_datetime, parse_integer, parse_number,
};

use super::operations::{ALL_COLUMNS, MissingMethod, MissingReport, Outcome, Report};

/// Which columns a missing-value operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingTarget {
    Column(String),
    /// Every column holding at least one missing value.
    All,
}

impl MissingTarget {
    pub fn parse(column: &str) -> Self {
        if column == ALL_COLUMNS {
            MissingTarget::All
        } else {
            MissingTarget::Column(column.to_string())
        }
    }
}

/// Apply `method` to the target columns.
///
/// Mean and median need a numeric column: naming a non-numeric column is a
/// schema error, while broadcast mode skips such columns and lists them in
/// the report.
pub fn handle_missing(
    table: &Table,
    target: &MissingTarget,
    method: MissingMethod,
    custom_value: Option<&str>,
) -> Result<Outcome> {
    let explicit = matches!(target, MissingTarget::Column(_));
    let columns = match target {
        MissingTarget::Column(name) => {
            table.require(name)?;
            vec![name.clone()]
        }
        MissingTarget::All => table.columns_with_missing(),
    };

    let custom = match method {
        MissingMethod::Custom => match custom_value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                return Err(PrepError::Parameter(
                    "A custom value is required for the custom method".to_string(),
                ));
            }
        },
        _ => None,
    };

    let missing_before = table.missing_count();

    if columns.is_empty() {
        return Ok(Outcome::vacuous(
            table.clone(),
            "No columns contain missing values",
        ));
    }

    let mut result = table.clone();
    let mut processed = Vec::new();
    let mut skipped = Vec::new();
    let mut rows_dropped = 0;

    if method == MissingMethod::Drop {
        let keep: Vec<bool> = (0..table.row_count())
            .map(|row| {
                columns
                    .iter()
                    .all(|c| table.get(row, c).is_some_and(|v| !v.is_missing()))
            })
            .collect();
        rows_dropped = keep.iter().filter(|k| !**k).count();
        result.retain_rows(&keep);
        processed = columns;
    } else {
        for name in columns {
            let column = result.require(&name)?;
            if matches!(method, MissingMethod::Mean | MissingMethod::Median) && !column.is_numeric()
            {
                if explicit {
                    return Err(PrepError::Schema(format!(
                        "Cannot fill '{}' with the {}: the column is {}, not numeric",
                        name, method, column.kind
                    )));
                }
                skipped.push(name);
                continue;
            }

            let filled = fill_column(column, method, custom)?;
            result.insert_column(filled)?;
            processed.push(name);
        }
    }

    let missing_after = result.missing_count();
    let report = MissingReport {
        method,
        missing_before,
        missing_after,
        columns_processed: processed.clone(),
        columns_skipped: skipped.clone(),
        rows_dropped,
    };

    if processed.is_empty() {
        return Ok(Outcome::vacuous(
            table.clone(),
            format!(
                "The {} method does not apply to any target column (skipped: {})",
                method,
                skipped.join(", ")
            ),
        ));
    }

    let mut message = if method == MissingMethod::Drop {
        format!(
            "Dropped {} rows with missing values. Missing values: {} before, {} after",
            rows_dropped, missing_before, missing_after
        )
    } else {
        format!(
            "Applied {} to {} column(s). Missing values: {} before, {} after",
            method,
            processed.len(),
            missing_before,
            missing_after
        )
    };
    if !skipped.is_empty() {
        message.push_str(&format!(". Skipped non-numeric: {}", skipped.join(", ")));
    }

    let emptied = result.row_count() == 0 && table.row_count() > 0;
    let outcome = Outcome::new(result, Report::Missing(report), message);
    if emptied {
        tracing::warn!("dropping missing values removed every row");
        let mut outcome = outcome.flag_vacuous();
        outcome.message.push_str(". Every row was removed");
        return Ok(outcome);
    }
    Ok(outcome)
}

/// Fill the missing cells of one column.
fn fill_column(column: &Column, method: MissingMethod, custom: Option<&str>) -> Result<Column> {
    let mut filled = column.clone();

    match method {
        MissingMethod::Mean | MissingMethod::Median => {
            let mut numbers = column.numeric_values();
            let stat = if method == MissingMethod::Mean {
                mean(&numbers)
            } else {
                median(&mut numbers)
            };
            if let Some(stat) = stat {
                fill_number(&mut filled, stat);
            }
        }
        MissingMethod::Mode => {
            if let Some(mode) = mode(column) {
                fill_with(&mut filled, &mode);
            }
        }
        MissingMethod::Zero => {
            let zero = zero_value(column.kind);
            if let Value::Text(ref level) = zero {
                filled.add_level(level);
            }
            fill_with(&mut filled, &zero);
        }
        MissingMethod::Custom => {
            let literal = custom.unwrap_or_default();
            let value = parse_literal(column, literal)?;
            if value.as_f64().is_some_and(|f| f.fract() != 0.0) && column.kind.is_integral() {
                fill_number(&mut filled, value.as_f64().unwrap_or_default());
            } else {
                if let Value::Text(ref level) = value {
                    filled.add_level(level);
                }
                fill_with(&mut filled, &value);
            }
        }
        MissingMethod::Ffill => {
            let mut last: Option<Value> = None;
            for cell in filled.values.iter_mut() {
                if cell.is_missing() {
                    if let Some(prev) = &last {
                        *cell = prev.clone();
                    }
                } else {
                    last = Some(cell.clone());
                }
            }
        }
        MissingMethod::Bfill => {
            let mut next: Option<Value> = None;
            for cell in filled.values.iter_mut().rev() {
                if cell.is_missing() {
                    if let Some(after) = &next {
                        *cell = after.clone();
                    }
                } else {
                    next = Some(cell.clone());
                }
            }
        }
        MissingMethod::Drop => {}
    }

    filled.settle_integer_kind();
    Ok(filled)
}

fn fill_with(column: &mut Column, value: &Value) {
    for cell in column.values.iter_mut().filter(|c| c.is_missing()) {
        *cell = value.clone();
    }
}

/// Fill with a number, widening an integral column to float when needed.
fn fill_number(column: &mut Column, value: f64) {
    if column.kind.is_integral() && value.fract() == 0.0 {
        fill_with(column, &Value::Int(value as i64));
        return;
    }
    if column.kind.is_integral() {
        column.kind = ColumnType::Float;
        for cell in column.values.iter_mut() {
            if let Value::Int(i) = cell {
                *cell = Value::Float(*i as f64);
            }
        }
    }
    fill_with(column, &Value::float(value));
}

fn zero_value(kind: ColumnType) -> Value {
    match kind {
        ColumnType::Integer | ColumnType::NullableInteger | ColumnType::Year => Value::Int(0),
        ColumnType::Float => Value::Float(0.0),
        ColumnType::Boolean => Value::Bool(false),
        ColumnType::DateTime => Value::DateTime(NaiveDateTime::default()),
        ColumnType::Categorical | ColumnType::Text => Value::text("0"),
    }
}

/// Parse a user literal into the column's type.
fn parse_literal(column: &Column, literal: &str) -> Result<Value> {
    let parsed = match column.kind {
        ColumnType::Integer | ColumnType::NullableInteger | ColumnType::Year => parse_integer(
            literal,
        )
        .map(Value::Int)
        .or_else(|| parse_number(literal).map(Value::Float)),
        ColumnType::Float => parse_number(literal).map(Value::Float),
        ColumnType::Boolean => parse_bool(literal).map(Value::Bool),
        ColumnType::DateTime => parse_datetime(literal).map(Value::DateTime),
        ColumnType::Categorical | ColumnType::Text => Some(Value::text(literal)),
    };

    parsed.ok_or_else(|| {
        PrepError::Parameter(format!(
            "Cannot use '{}' as a fill value for {} column '{}'",
            literal, column.kind, column.name
        ))
    })
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent present value; ties go to the smallest.
pub(crate) fn mode(column: &Column) -> Option<Value> {
    let mut present: Vec<&Value> = column.values.iter().filter(|v| !v.is_missing()).collect();
    present.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(&Value, usize)> = None;
    let mut i = 0;
    while i < present.len() {
        let mut j = i + 1;
        while j < present.len() && present[j].total_cmp(present[i]) == Ordering::Equal {
            j += 1;
        }
        let count = j - i;
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((present[i], count));
        }
        i = j;
    }
    best.map(|(v, _)| v.clone())
}
