//! CSV export of the working table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PrepError, Result};
use crate::table::Table;

/// Write `table` as comma-separated UTF-8 with a header row.
///
/// Row identifiers are not written. Missing cells are empty; floats keep at
/// least one decimal; booleans print as `True`/`False`.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.column_names())?;

    let columns: Vec<_> = table.columns().collect();
    for row in 0..table.row_count() {
        out.write_record(columns.iter().map(|c| c.values[row].to_string()))?;
    }
    out.flush().map_err(|e| PrepError::Csv(e.into()))?;
    Ok(())
}

/// Render `table` as CSV bytes.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// Write `table` as CSV to `path`.
pub fn to_csv_file(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PrepError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_csv(table, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType, Value};
    use chrono::NaiveDate;

    #[test]
    fn test_csv_rendering() {
        let dt = NaiveDate::from_ymd_opt(2014, 8, 27)
            .unwrap()
            .and_hms_opt(11, 29, 31)
            .unwrap();
        let mut table = Table::from_columns(vec![
            Column::integer("Age", vec![Value::Int(30), Value::Missing]),
            Column::new("score", ColumnType::Float, vec![Value::Float(1.0), Value::Float(0.25)]),
            Column::new("flag", ColumnType::Boolean, vec![Value::Bool(true), Value::Missing]),
            Column::new(
                "Country",
                ColumnType::Text,
                vec![Value::text("Bahamas, The"), Value::text("Canada")],
            ),
            Column::new("when", ColumnType::DateTime, vec![Value::DateTime(dt), Value::Missing]),
        ])
        .unwrap();
        table.retain_rows(&[true, true]);

        let csv = String::from_utf8(to_csv(&table).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Age,score,flag,Country,when\n\
             30,1.0,True,\"Bahamas, The\",2014-08-27 11:29:31\n\
             ,0.25,,Canada,\n"
        );
    }
}
