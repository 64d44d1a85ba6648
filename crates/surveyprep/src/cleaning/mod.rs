//! Ingestion-time cleaning: canonical vocabularies, then canonical types.

pub mod canonicalize;
pub mod coerce;
pub mod rules;

pub use canonicalize::{canonicalize, canonicalize_with};
pub use coerce::{CANONICAL_SCHEMA, Schema, coerce, coerce_column};
pub use rules::{
    CATEGORICAL_COLUMNS, COUNT_COLUMNS, ColumnRules, Normalization, Rule, RuleSet, SURVEY_RULES,
    Target, Vocabulary,
};

use crate::table::Table;

/// Canonicalize with the survey rules, then apply the canonical schema.
pub fn clean(table: Table) -> Table {
    let cleaned = coerce(canonicalize(table), &CANONICAL_SCHEMA);
    tracing::info!(
        rows = cleaned.row_count(),
        columns = cleaned.column_count(),
        missing = cleaned.missing_count(),
        "cleaned survey table"
    );
    cleaned
}
