//! Tagged cell values and the parsing helpers that move between tags.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Format used for date-times in the wire encoding.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Format used for date-times in CSV export.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// A single cell.
///
/// Categorical and free-text cells are both `Text`; the distinction lives on
/// the column. `Missing` is an explicit marker and never equal to any string,
/// including the empty one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    /// Always finite.
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
    Missing,
}

impl Value {
    /// Build a float cell; non-finite input becomes missing.
    pub fn float(value: f64) -> Self {
        if value.is_finite() {
            Value::Float(value)
        } else {
            Value::Missing
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell. Only `Int` and `Float` have one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text rendering of a present cell, `None` for missing.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            other => Some(other.to_string()),
        }
    }

    /// Order used for sorting distinct values and picking modes.
    ///
    /// Numbers compare numerically with each other, everything else compares
    /// within its own tag, and missing sorts last.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Missing, Value::Missing) => Ordering::Equal,
            (Value::Missing, _) => Ordering::Greater,
            (_, Value::Missing) => Ordering::Less,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.tag_rank().cmp(&b.tag_rank()),
            },
        }
    }

    fn tag_rank(&self) -> u8 {
        match self {
            Value::Int(_) | Value::Float(_) => 0,
            Value::Bool(_) => 1,
            Value::DateTime(_) => 2,
            Value::Text(_) => 3,
            Value::Missing => 4,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(CSV_DATETIME_FORMAT)),
            Value::Missing => Ok(()),
        }
    }
}

/// Format a float the way a data-frame prints it: whole numbers keep one decimal.
pub fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Strict numeric parse. Rejects empty strings, NaN and infinities.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse an integer literal, accepting whole-valued decimals such as `"30.0"`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    parse_number(trimmed)
        .filter(|f| f.fract() == 0.0)
        .and_then(truncate_to_i64)
}

/// Truncate toward zero, rejecting values outside the `i64` range.
pub fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Parse a boolean literal.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "t" | "y" | "1" => Some(true),
        "false" | "no" | "f" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a timestamp in any of the common survey export formats.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}
