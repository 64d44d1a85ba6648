//! The "split" wire encoding of a table.
//!
//! ```text
//! {"columns": ["Age", "Gender"], "index": [0, 1], "data": [[30, "Male"], [null, "Female"]]}
//! ```
//!
//! This is both the session-storage representation handed to external
//! consumers and the basis for CSV export. Column types are not carried; they
//! are re-inferred from the values on decode. Strings always decode as text,
//! so a date-time column only comes back as [`ColumnType::DateTime`] when the
//! caller names it through [`from_json_with_types`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as Json};

use crate::error::{PrepError, Result};

use super::column::Column;
use super::frame::Table;
use super::types::ColumnType;
use super::value::{Value, WIRE_DATETIME_FORMAT};

/// Row-major table payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTable {
    pub columns: Vec<String>,
    pub index: Vec<i64>,
    pub data: Vec<Vec<Json>>,
}

impl From<&Table> for WireTable {
    fn from(table: &Table) -> Self {
        let columns: Vec<&Column> = table.columns().collect();
        let data = (0..table.row_count())
            .map(|row| columns.iter().map(|c| encode_value(&c.values[row])).collect())
            .collect();

        Self {
            columns: table.column_names(),
            index: table.index().to_vec(),
            data,
        }
    }
}

impl TryFrom<WireTable> for Table {
    type Error = PrepError;

    fn try_from(wire: WireTable) -> Result<Self> {
        decode(wire, &[])
    }
}

/// Rebuild a table, parsing the columns hinted as date-times.
fn decode(wire: WireTable, types: &[(&str, ColumnType)]) -> Result<Table> {
    if wire.index.len() != wire.data.len() {
        return Err(PrepError::Ingestion(format!(
            "Table payload has {} row identifiers but {} rows",
            wire.index.len(),
            wire.data.len()
        )));
    }

    let width = wire.columns.len();
    let mut cells: Vec<Vec<Json>> = vec![Vec::with_capacity(wire.data.len()); width];
    for (row_idx, row) in wire.data.into_iter().enumerate() {
        if row.len() != width {
            return Err(PrepError::Ingestion(format!(
                "Row {} has {} values, expected {}",
                row_idx,
                row.len(),
                width
            )));
        }
        for (col_idx, cell) in row.into_iter().enumerate() {
            cells[col_idx].push(cell);
        }
    }

    let columns = wire
        .columns
        .into_iter()
        .zip(cells)
        .map(|(name, values)| {
            let datetime = types
                .iter()
                .any(|(hint, kind)| *hint == name && *kind == ColumnType::DateTime);
            decode_column(name, values, datetime)
        })
        .collect();

    Table::with_index(wire.index, columns)
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireTable::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = WireTable::deserialize(deserializer)?;
        Table::try_from(wire).map_err(serde::de::Error::custom)
    }
}

/// Serialize a table to its wire JSON.
pub fn to_json(table: &Table) -> Result<String> {
    Ok(serde_json::to_string(table)?)
}

/// Deserialize a table from its wire JSON.
pub fn from_json(json: &str) -> Result<Table> {
    let wire: WireTable = serde_json::from_str(json)?;
    Table::try_from(wire)
}

/// Deserialize a table, decoding the named columns as the given types.
///
/// Only [`ColumnType::DateTime`] hints change decoding; a hinted column whose
/// strings do not all parse stays text.
pub fn from_json_with_types(json: &str, types: &[(&str, ColumnType)]) -> Result<Table> {
    let wire: WireTable = serde_json::from_str(json)?;
    decode(wire, types)
}

fn encode_value(value: &Value) -> Json {
    match value {
        Value::Int(i) => Json::Number(Number::from(*i)),
        Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Bool(b) => Json::Bool(*b),
        Value::Text(s) => Json::String(s.clone()),
        Value::DateTime(dt) => Json::String(dt.format(WIRE_DATETIME_FORMAT).to_string()),
        Value::Missing => Json::Null,
    }
}

/// Infer a column type from decoded JSON cells.
fn decode_column(name: String, cells: Vec<Json>, datetime: bool) -> Column {
    let present: Vec<&Json> = cells.iter().filter(|c| !c.is_null()).collect();

    let all_ints = !present.is_empty() && present.iter().all(|c| c.as_i64().is_some());
    let all_numbers = !present.is_empty() && present.iter().all(|c| c.is_number());
    let all_bools = !present.is_empty() && present.iter().all(|c| c.is_boolean());
    let all_datetimes = datetime
        && !present.is_empty()
        && present.iter().all(|c| {
            c.as_str()
                .is_some_and(|s| NaiveDateTime::parse_from_str(s, WIRE_DATETIME_FORMAT).is_ok())
        });

    if all_ints {
        let values = cells
            .iter()
            .map(|c| c.as_i64().map(Value::Int).unwrap_or(Value::Missing))
            .collect();
        return Column::integer(name, values);
    }

    if all_numbers {
        let values = cells
            .iter()
            .map(|c| c.as_f64().map(Value::float).unwrap_or(Value::Missing))
            .collect();
        return Column::new(name, ColumnType::Float, values);
    }

    if all_bools {
        let values = cells
            .iter()
            .map(|c| c.as_bool().map(Value::Bool).unwrap_or(Value::Missing))
            .collect();
        return Column::new(name, ColumnType::Boolean, values);
    }

    if all_datetimes {
        let values = cells
            .iter()
            .map(|c| {
                c.as_str()
                    .and_then(|s| NaiveDateTime::parse_from_str(s, WIRE_DATETIME_FORMAT).ok())
                    .map(Value::DateTime)
                    .unwrap_or(Value::Missing)
            })
            .collect();
        return Column::new(name, ColumnType::DateTime, values);
    }

    let values = cells
        .into_iter()
        .map(|c| match c {
            Json::Null => Value::Missing,
            Json::String(s) => Value::Text(s),
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::float))
                .unwrap_or(Value::Missing),
            other => Value::Text(other.to_string()),
        })
        .collect();
    Column::new(name, ColumnType::Text, values)
}
