//! The table: ordered, uniquely named columns sharing one row index.

use indexmap::IndexMap;

use crate::error::{PrepError, Result};

use super::column::Column;
use super::value::Value;

/// An ordered mapping from column name to column plus row identifiers.
///
/// Every column has exactly `index.len()` cells and names are unique. Row
/// identifiers start as `0..n` and survive row drops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    index: Vec<i64>,
}

impl Table {
    /// Create a table from columns with a fresh `0..n` index.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        Self::with_index((0..rows as i64).collect(), columns)
    }

    /// Create a table from columns and explicit row identifiers.
    pub fn with_index(index: Vec<i64>, columns: Vec<Column>) -> Result<Self> {
        let mut table = Self {
            columns: IndexMap::with_capacity(columns.len()),
            index,
        };
        for column in columns {
            if table.columns.contains_key(&column.name) {
                return Err(PrepError::Schema(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
            table.insert_column(column)?;
        }
        Ok(table)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row identifiers, in row order.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    /// Iterate over the columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column or fail with a schema error.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| PrepError::unknown_column(name))
    }

    /// Get a column mutably or fail with a schema error.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .get_mut(name)
            .ok_or_else(|| PrepError::unknown_column(name))
    }

    /// Get a cell by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.columns.get(column).and_then(|c| c.values.get(row))
    }

    /// Insert a column. An existing column of the same name is replaced in place;
    /// a new one is appended.
    pub fn insert_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.row_count() {
            return Err(PrepError::Schema(format!(
                "Column '{}' has {} values but the table has {} rows",
                column.name,
                column.len(),
                self.row_count()
            )));
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Remove a column, preserving the order of the rest.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        self.columns.shift_remove(name)
    }

    /// Keep only the rows whose mask entry is true.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let mut mask = keep.iter();
        self.index.retain(|_| *mask.next().unwrap_or(&true));
        for column in self.columns.values_mut() {
            let mut mask = keep.iter();
            column.values.retain(|_| *mask.next().unwrap_or(&true));
            column.settle_integer_kind();
        }
    }

    /// Keep the given row positions, in the given order.
    pub fn take_rows(&self, positions: &[usize]) -> Table {
        let index = positions.iter().map(|&p| self.index[p]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| {
                let mut taken = col.clone();
                taken.values = positions.iter().map(|&p| col.values[p].clone()).collect();
                (name.clone(), taken)
            })
            .collect();
        Table { columns, index }
    }

    /// Total number of missing cells in the table.
    pub fn missing_count(&self) -> usize {
        self.columns.values().map(Column::missing_count).sum()
    }

    /// Names of columns holding at least one missing cell.
    pub fn columns_with_missing(&self) -> Vec<String> {
        self.columns
            .values()
            .filter(|c| c.missing_count() > 0)
            .map(|c| c.name.clone())
            .collect()
    }
}
