//! A named, typed column of cells.

use std::collections::BTreeSet;

use super::types::ColumnType;
use super::value::Value;

/// A single column: name, semantic type, cells, and the level set for categoricals.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Semantic type.
    pub kind: ColumnType,
    /// Cells, one per row.
    pub values: Vec<Value>,
    /// Legal vocabulary for categorical columns, in level order. Empty otherwise.
    pub levels: Vec<String>,
}

impl Column {
    /// Create a column. Categorical columns get their observed level set.
    pub fn new(name: impl Into<String>, kind: ColumnType, values: Vec<Value>) -> Self {
        let mut column = Self {
            name: name.into(),
            kind,
            values,
            levels: Vec::new(),
        };
        if kind == ColumnType::Categorical {
            column.levels = column.distinct_text();
        }
        column
    }

    /// Create a categorical column with an explicit, ordered level set.
    pub fn categorical(name: impl Into<String>, values: Vec<Value>, levels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnType::Categorical,
            values,
            levels,
        }
    }

    /// Create an integer column, nullable when any cell is missing.
    pub fn integer(name: impl Into<String>, values: Vec<Value>) -> Self {
        let kind = if values.iter().any(Value::is_missing) {
            ColumnType::NullableInteger
        } else {
            ColumnType::Integer
        };
        Self::new(name, kind, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Number of present cells.
    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Present numeric cells, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Sorted distinct text renderings of the present cells.
    pub fn distinct_text(&self) -> Vec<String> {
        self.values
            .iter()
            .filter_map(Value::render)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Present cells sorted and de-duplicated with [`Value::total_cmp`].
    pub fn distinct_values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .cloned()
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup_by(|a, b| a.total_cmp(b).is_eq());
        values
    }

    /// Re-derive `Integer` vs `NullableInteger` after cells changed.
    pub fn settle_integer_kind(&mut self) {
        if matches!(self.kind, ColumnType::Integer | ColumnType::NullableInteger) {
            self.kind = if self.values.iter().any(Value::is_missing) {
                ColumnType::NullableInteger
            } else {
                ColumnType::Integer
            };
        }
    }

    /// Add a level to a categorical column if it is not already legal.
    pub fn add_level(&mut self, level: &str) {
        if self.kind == ColumnType::Categorical && !self.levels.iter().any(|l| l == level) {
            self.levels.push(level.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_levels_are_sorted_distinct() {
        let col = Column::new(
            "treatment",
            ColumnType::Categorical,
            vec![
                Value::text("Yes"),
                Value::text("No"),
                Value::Missing,
                Value::text("Yes"),
            ],
        );
        assert_eq!(col.levels, vec!["No", "Yes"]);
        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.present_count(), 3);
    }

    #[test]
    fn test_integer_kind_tracks_missing() {
        let mut col = Column::integer("age", vec![Value::Int(30), Value::Missing]);
        assert_eq!(col.kind, ColumnType::NullableInteger);
        col.values[1] = Value::Int(0);
        col.settle_integer_kind();
        assert_eq!(col.kind, ColumnType::Integer);
    }

    #[test]
    fn test_distinct_values_numeric_order() {
        let col = Column::new(
            "x",
            ColumnType::Float,
            vec![Value::Float(10.0), Value::Float(2.0), Value::Float(10.0)],
        );
        assert_eq!(col.distinct_values(), vec![Value::Float(2.0), Value::Float(10.0)]);
    }
}
