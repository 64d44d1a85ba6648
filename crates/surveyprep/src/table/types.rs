//! Core type definitions for the semantic column model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic type of a column, independent of how it was stored on ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers, no missing values.
    Integer,
    /// Whole numbers that may be missing.
    NullableInteger,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Strings drawn from a fixed level set.
    Categorical,
    /// Free text.
    Text,
    /// Calendar year extracted from a timestamp.
    Year,
    /// Full date and time.
    DateTime,
}

impl ColumnType {
    /// Returns true if this type is numeric. Booleans are not numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::NullableInteger | ColumnType::Float | ColumnType::Year
        )
    }

    /// Returns true if cells of this type are whole numbers.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::NullableInteger | ColumnType::Year
        )
    }

    /// Returns true if cells of this type are strings (categorical or free text).
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::Categorical | ColumnType::Text)
    }

    /// Short lowercase name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::NullableInteger => "nullable_integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
            ColumnType::Year => "year",
            ColumnType::DateTime => "datetime",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of a type coercion, either from the canonical schema or a user conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Numeric parse, missing filled with 0, truncated to integer.
    Int,
    /// Numeric parse, truncated to integer, missing kept.
    NullableInt,
    /// Strict numeric parse.
    Float,
    /// Text rendering of every cell.
    String,
    /// Timestamp parse.
    #[serde(rename = "datetime")]
    DateTime,
    /// Freeze the column into a categorical with its current level set.
    Categorical,
    /// Boolean coercion.
    Boolean,
    /// Year extracted from a full timestamp.
    Year,
}

impl TargetType {
    /// Column type produced by this target.
    pub fn column_type(&self) -> ColumnType {
        match self {
            TargetType::Int => ColumnType::Integer,
            TargetType::NullableInt => ColumnType::NullableInteger,
            TargetType::Float => ColumnType::Float,
            TargetType::String => ColumnType::Text,
            TargetType::DateTime => ColumnType::DateTime,
            TargetType::Categorical => ColumnType::Categorical,
            TargetType::Boolean => ColumnType::Boolean,
            TargetType::Year => ColumnType::Year,
        }
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "integer" => Ok(TargetType::Int),
            "nullable_int" | "int64" => Ok(TargetType::NullableInt),
            "float" | "double" => Ok(TargetType::Float),
            "string" | "str" | "text" => Ok(TargetType::String),
            "datetime" | "date" => Ok(TargetType::DateTime),
            "categorical" | "category" => Ok(TargetType::Categorical),
            "boolean" | "bool" => Ok(TargetType::Boolean),
            "year" => Ok(TargetType::Year),
            _ => Err(format!(
                "Unknown target type: {}. Use int, float, string, datetime, categorical, or boolean.",
                s
            )),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetType::Int => "int",
            TargetType::NullableInt => "nullable_int",
            TargetType::Float => "float",
            TargetType::String => "string",
            TargetType::DateTime => "datetime",
            TargetType::Categorical => "categorical",
            TargetType::Boolean => "boolean",
            TargetType::Year => "year",
        };
        f.write_str(name)
    }
}
