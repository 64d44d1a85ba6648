//! Rule-driven column canonicalization.

use crate::table::{Column, ColumnType, Table, Value, parse_number};

use super::rules::{ColumnRules, RuleSet, SURVEY_RULES, Target, Vocabulary};

/// Canonicalize a table with the survey rule set.
pub fn canonicalize(table: Table) -> Table {
    canonicalize_with(table, &SURVEY_RULES)
}

/// Canonicalize every column of `table` that has rules in `rules`.
///
/// Column order and row count are preserved; columns without rules pass
/// through untouched. Applying this twice gives the same table as applying it once.
pub fn canonicalize_with(mut table: Table, rules: &RuleSet) -> Table {
    let names = table.column_names();
    for name in names {
        let Some(column_rules) = rules.get(&name) else {
            continue;
        };
        if let Some(column) = table.column_mut(&name) {
            let before = column.missing_count();
            *column = canonicalize_column(column, column_rules);
            tracing::debug!(
                column = %name,
                newly_missing = column.missing_count().saturating_sub(before),
                "canonicalized column"
            );
        }
    }
    table
}

/// Rewrite a column's cells through its rules.
pub fn canonicalize_column(column: &Column, rules: &ColumnRules) -> Column {
    let values: Vec<Value> = column
        .values
        .iter()
        .map(|value| canonical_value(value, rules))
        .collect();

    if rules.range.is_some() {
        if values.iter().all(|v| matches!(v, Value::Int(_) | Value::Missing)) {
            return Column::integer(column.name.clone(), values);
        }
        return Column::new(column.name.clone(), ColumnType::Float, values);
    }

    let kind = if column.kind == ColumnType::Categorical {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    };
    Column::new(column.name.clone(), kind, values)
}

/// Canonical form of one cell.
pub fn canonical_value(value: &Value, rules: &ColumnRules) -> Value {
    let Some(raw) = value.render() else {
        return Value::Missing;
    };

    if let Some((min, max)) = rules.range {
        return match parse_number(&raw) {
            Some(n) if n >= min && n <= max => whole_or_float(n),
            _ => Value::Missing,
        };
    }

    let key = rules.normalization.apply(&raw);

    for rule in &rules.rules {
        if rule.variants.contains(&key.as_str()) {
            return match rule.target {
                Target::Label(label) => Value::text(label),
                Target::Missing => Value::Missing,
            };
        }
    }

    match rules.vocabulary {
        Vocabulary::Closed(labels) => labels
            .iter()
            .find(|label| rules.normalization.apply(label) == key)
            .map(|label| Value::text(*label))
            .unwrap_or(Value::Missing),
        Vocabulary::Open => Value::Text(raw),
    }
}

fn whole_or_float(n: f64) -> Value {
    if n.fract() == 0.0 {
        Value::Int(n as i64)
    } else {
        Value::Float(n)
    }
}
