//! Type coercion: parse every cell of a column into a target type.
//!
//! Coercion never fails. A cell that cannot be parsed becomes missing.

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;

use crate::table::{
    Column, ColumnType, Table, TargetType, Value, parse_bool, parse_datetime, parse_number,
    truncate_to_i64,
};

use super::rules::{CATEGORICAL_COLUMNS, COUNT_COLUMNS};

/// An ordered list of column → target type assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, TargetType)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment, builder style.
    pub fn with(mut self, column: impl Into<String>, target: TargetType) -> Self {
        self.entries.push((column.into(), target));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TargetType)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Schema applied once after canonicalization at ingestion.
pub static CANONICAL_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let mut schema = Schema::new()
        .with("Timestamp", TargetType::Year)
        .with("Age", TargetType::NullableInt);
    for column in CATEGORICAL_COLUMNS {
        schema = schema.with(*column, TargetType::Categorical);
    }
    for column in COUNT_COLUMNS {
        schema = schema.with(*column, TargetType::NullableInt);
    }
    schema
});

/// Coerce every schema column present in `table`. Absent columns are skipped.
pub fn coerce(mut table: Table, schema: &Schema) -> Table {
    for (name, target) in schema.iter() {
        if let Some(column) = table.column_mut(name) {
            *column = coerce_column(column, target);
        }
    }
    table
}

/// Coerce one column into `target`.
pub fn coerce_column(column: &Column, target: TargetType) -> Column {
    let name = column.name.clone();
    let source = column.kind;

    match target {
        TargetType::Float => Column::new(
            name,
            ColumnType::Float,
            column.values.iter().map(to_float).collect(),
        ),
        TargetType::NullableInt => {
            Column::integer(name, column.values.iter().map(to_integer).collect())
        }
        TargetType::Int => {
            let values = column
                .values
                .iter()
                .map(|v| match to_integer(v) {
                    Value::Missing => Value::Int(0),
                    other => other,
                })
                .collect();
            Column::new(name, ColumnType::Integer, values)
        }
        TargetType::Boolean => Column::new(
            name,
            ColumnType::Boolean,
            column.values.iter().map(to_bool).collect(),
        ),
        TargetType::Year => Column::new(
            name,
            ColumnType::Year,
            column.values.iter().map(|v| to_year(v, source)).collect(),
        ),
        TargetType::DateTime => Column::new(
            name,
            ColumnType::DateTime,
            column.values.iter().map(|v| to_datetime(v, source)).collect(),
        ),
        TargetType::Categorical => Column::new(
            name,
            ColumnType::Categorical,
            column.values.iter().map(to_text).collect(),
        ),
        TargetType::String => Column::new(
            name,
            ColumnType::Text,
            column.values.iter().map(to_text).collect(),
        ),
    }
}

fn to_float(value: &Value) -> Value {
    match value {
        Value::Int(i) => Value::Float(*i as f64),
        Value::Float(f) => Value::Float(*f),
        Value::Bool(b) => Value::Float(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => parse_number(s).map(Value::Float).unwrap_or(Value::Missing),
        Value::DateTime(_) | Value::Missing => Value::Missing,
    }
}

fn to_integer(value: &Value) -> Value {
    match to_float(value) {
        Value::Float(f) => truncate_to_i64(f).map(Value::Int).unwrap_or(Value::Missing),
        _ => Value::Missing,
    }
}

fn to_bool(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::Int(i) => Value::Bool(*i != 0),
        Value::Float(f) => Value::Bool(*f != 0.0),
        Value::Text(s) => parse_bool(s).map(Value::Bool).unwrap_or(Value::Missing),
        Value::DateTime(_) | Value::Missing => Value::Missing,
    }
}

fn to_year(value: &Value, source: ColumnType) -> Value {
    match value {
        Value::DateTime(dt) => Value::Int(dt.year() as i64),
        Value::Int(year) if source == ColumnType::Year => Value::Int(*year),
        Value::Text(s) => parse_datetime(s)
            .map(|dt| Value::Int(dt.year() as i64))
            .unwrap_or(Value::Missing),
        _ => Value::Missing,
    }
}

fn to_datetime(value: &Value, source: ColumnType) -> Value {
    match value {
        Value::DateTime(dt) => Value::DateTime(*dt),
        Value::Int(year) if source == ColumnType::Year => i32::try_from(*year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .map(|d| Value::DateTime(d.and_time(NaiveTime::MIN)))
            .unwrap_or(Value::Missing),
        Value::Text(s) => parse_datetime(s)
            .map(Value::DateTime)
            .unwrap_or(Value::Missing),
        _ => Value::Missing,
    }
}

fn to_text(value: &Value) -> Value {
    value.render().map(Value::Text).unwrap_or(Value::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, cells: &[Option<&str>]) -> Column {
        Column::new(
            name,
            ColumnType::Text,
            cells
                .iter()
                .map(|c| c.map(Value::text).unwrap_or(Value::Missing))
                .collect(),
        )
    }

    #[test]
    fn test_timestamp_to_year() {
        let col = text(
            "Timestamp",
            &[Some("2014-08-27 11:29:31"), Some("not a date"), None],
        );
        let year = coerce_column(&col, TargetType::Year);
        assert_eq!(year.kind, ColumnType::Year);
        assert_eq!(year.values, vec![Value::Int(2014), Value::Missing, Value::Missing]);
    }

    #[test]
    fn test_to_int_fills_then_truncates() {
        let col = text("x", &[Some("3.9"), Some("abc"), None, Some("-2.5")]);
        let ints = coerce_column(&col, TargetType::Int);
        assert_eq!(ints.kind, ColumnType::Integer);
        assert_eq!(
            ints.values,
            vec![Value::Int(3), Value::Int(0), Value::Int(0), Value::Int(-2)]
        );
    }

    #[test]
    fn test_nullable_int_keeps_missing() {
        let col = text("x", &[Some("3.9"), Some("abc")]);
        let ints = coerce_column(&col, TargetType::NullableInt);
        assert_eq!(ints.kind, ColumnType::NullableInteger);
        assert_eq!(ints.values, vec![Value::Int(3), Value::Missing]);
    }

    #[test]
    fn test_boolean_spellings() {
        let col = text("b", &[Some("Yes"), Some("n"), Some("T"), Some("0"), Some("maybe")]);
        let bools = coerce_column(&col, TargetType::Boolean);
        assert_eq!(
            bools.values,
            vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(true),
                Value::Bool(false),
                Value::Missing,
            ]
        );

        let nums = Column::integer("n", vec![Value::Int(2), Value::Int(0)]);
        assert_eq!(
            coerce_column(&nums, TargetType::Boolean).values,
            vec![Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn test_year_to_datetime() {
        let year = Column::new("Timestamp", ColumnType::Year, vec![Value::Int(2014)]);
        let dt = coerce_column(&year, TargetType::DateTime);
        assert_eq!(
            dt.values[0],
            Value::DateTime(
                NaiveDate::from_ymd_opt(2014, 1, 1)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            )
        );
    }

    #[test]
    fn test_plain_integers_are_not_dates() {
        let col = Column::integer("n", vec![Value::Int(2014)]);
        assert_eq!(
            coerce_column(&col, TargetType::DateTime).values,
            vec![Value::Missing]
        );
    }

    #[test]
    fn test_categorical_freeze_levels() {
        let col = text("c", &[Some("b"), Some("a"), None, Some("b")]);
        let frozen = coerce_column(&col, TargetType::Categorical);
        assert_eq!(frozen.kind, ColumnType::Categorical);
        assert_eq!(frozen.levels, vec!["a", "b"]);
        assert_eq!(frozen.missing_count(), 1);
    }

    #[test]
    fn test_string_keeps_missing_and_renders_numbers() {
        let col = Column::new(
            "x",
            ColumnType::Float,
            vec![Value::Float(2.0), Value::Missing],
        );
        let strings = coerce_column(&col, TargetType::String);
        assert_eq!(strings.values, vec![Value::text("2.0"), Value::Missing]);
    }

    #[test]
    fn test_schema_skips_absent_columns() {
        let table = Table::from_columns(vec![text("Age", &[Some("30"), Some("x")])]).unwrap();
        let coerced = coerce(table, &CANONICAL_SCHEMA);
        assert_eq!(
            coerced.column("Age").unwrap().values,
            vec![Value::Int(30), Value::Missing]
        );
        assert_eq!(coerced.column_count(), 1);
    }
}
