//! Table-wide missing-value and type summaries.

use serde::{Deserialize, Serialize};

use crate::table::{ColumnType, Table};

/// Missing values in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
    /// Share of rows, in percent, rounded to two decimals.
    pub percentage: f64,
}

/// Missing values per column plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSummary {
    pub total_missing: usize,
    pub columns_with_missing: usize,
    pub columns: Vec<ColumnMissing>,
}

impl MissingSummary {
    pub fn of(table: &Table) -> Self {
        let rows = table.row_count();
        let columns: Vec<ColumnMissing> = table
            .columns()
            .map(|c| {
                let missing = c.missing_count();
                ColumnMissing {
                    column: c.name.clone(),
                    missing,
                    percentage: percent(missing, rows),
                }
            })
            .collect();

        Self {
            total_missing: columns.iter().map(|c| c.missing).sum(),
            columns_with_missing: columns.iter().filter(|c| c.missing > 0).count(),
            columns,
        }
    }

    pub fn has_missing(&self) -> bool {
        self.total_missing > 0
    }
}

/// Type and fill of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDtype {
    pub column: String,
    pub dtype: ColumnType,
    pub non_null: usize,
    pub null: usize,
}

/// Column types with non-null and null counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtypeSummary {
    pub columns: Vec<ColumnDtype>,
}

impl DtypeSummary {
    pub fn of(table: &Table) -> Self {
        Self {
            columns: table
                .columns()
                .map(|c| ColumnDtype {
                    column: c.name.clone(),
                    dtype: c.kind,
                    non_null: c.present_count(),
                    null: c.missing_count(),
                })
                .collect(),
        }
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}
