//! Parsed source data and its metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{Column, ColumnType, Table, Value, parse_number};

/// Cell strings read as missing, matching the usual data-frame reader defaults.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Metadata about an ingested payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name, when the payload came from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Full path, when the payload came from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Encoding the bytes were decoded with.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the payload was ingested.
    pub ingested_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        hash: String,
        size_bytes: u64,
        format: String,
        encoding: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: None,
            path: None,
            hash,
            size_bytes,
            format,
            encoding,
            row_count,
            column_count,
            ingested_at: Utc::now(),
        }
    }

    /// Attach the on-disk location of the payload.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned());
        self.path = Some(path);
        self
    }
}

/// Delimited text split into headers and string rows, before typing.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, already de-duplicated.
    pub headers: Vec<String>,
    /// Row data (row-major). `None` marks a null token or a padded cell.
    pub rows: Vec<Vec<Option<String>>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Check if a raw cell is one of the null tokens.
    pub fn is_null_value(value: &str) -> bool {
        NULL_TOKENS.contains(&value)
    }

    /// Type every column from its cells and build a [`Table`].
    pub fn into_table(self) -> Result<Table> {
        let DataTable { headers, rows, .. } = self;
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for row in rows {
            for (col_idx, cell) in row.into_iter().enumerate() {
                if let Some(column) = cells.get_mut(col_idx) {
                    column.push(cell);
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        Table::from_columns(columns)
    }
}

/// Infer the narrowest column type that every present cell fits.
///
/// Order: integer, float, boolean (`True`/`False` spellings), then text. A
/// column with no present cells is float, like an all-NaN column.
fn infer_column(name: String, raw: Vec<Option<String>>) -> Column {
    let present: Vec<&str> = raw.iter().filter_map(|c| c.as_deref()).collect();

    if present.is_empty() {
        return Column::new(name, ColumnType::Float, vec![Value::Missing; raw.len()]);
    }

    if present.iter().all(|s| s.trim().parse::<i64>().is_ok()) {
        let values = raw
            .iter()
            .map(|c| match c.as_deref().map(|s| s.trim().parse::<i64>()) {
                Some(Ok(i)) => Value::Int(i),
                _ => Value::Missing,
            })
            .collect();
        return Column::integer(name, values);
    }

    if present.iter().all(|s| parse_number(s).is_some()) {
        let values = raw
            .iter()
            .map(|c| {
                c.as_deref()
                    .and_then(parse_number)
                    .map(Value::Float)
                    .unwrap_or(Value::Missing)
            })
            .collect();
        return Column::new(name, ColumnType::Float, values);
    }

    if present.iter().all(|s| literal_bool(s).is_some()) {
        let values = raw
            .iter()
            .map(|c| {
                c.as_deref()
                    .and_then(literal_bool)
                    .map(Value::Bool)
                    .unwrap_or(Value::Missing)
            })
            .collect();
        return Column::new(name, ColumnType::Boolean, values);
    }

    let values = raw
        .into_iter()
        .map(|c| c.map(Value::Text).unwrap_or(Value::Missing))
        .collect();
    Column::new(name, ColumnType::Text, values)
}

fn literal_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}
