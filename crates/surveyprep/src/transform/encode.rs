//! Label and one-hot encoding of categorical and text columns.

use std::collections::{BTreeSet, HashMap};

use crate::error::{PrepError, Result};
use crate::table::{Column, ColumnType, Table, Value};

use super::operations::{ColumnCategories, EncodeMethod, EncoderParams, Outcome, Report};

/// Encode every categorical or text column.
///
/// Targets are rendered to text first, so categorical and free-text columns
/// encode the same way. Codes and indicator order follow the sorted distinct
/// values.
pub fn encode(table: &Table, method: EncodeMethod) -> Result<Outcome> {
    let targets: Vec<String> = table
        .columns()
        .filter(|c| c.kind.is_textual())
        .map(|c| c.name.clone())
        .collect();

    if targets.is_empty() {
        tracing::warn!("encode found no categorical columns");
        return Ok(Outcome::vacuous(
            table.clone(),
            "No categorical or text columns to encode",
        ));
    }

    let (result, params) = match method {
        EncodeMethod::Label => label_encode(table, &targets)?,
        EncodeMethod::Onehot => one_hot_encode(table, &targets)?,
    };

    let message = format!(
        "Applied {} encoding to {} column(s): {}",
        method.as_str(),
        targets.len(),
        targets.join(", ")
    );
    Ok(Outcome::new(
        result,
        Report::Encode(EncoderParams {
            method,
            columns: params,
        }),
        message,
    ))
}

/// Text view of a column: rendered strings, missing kept.
fn as_text(column: &Column) -> Vec<Option<String>> {
    column.values.iter().map(Value::render).collect()
}

fn sorted_categories(cells: &[Option<String>]) -> Vec<String> {
    cells
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn label_encode(table: &Table, targets: &[String]) -> Result<(Table, Vec<ColumnCategories>)> {
    let mut result = table.clone();
    let mut params = Vec::with_capacity(targets.len());

    for name in targets {
        let cells = as_text(result.require(name)?);
        let categories = sorted_categories(&cells);
        let values = {
            let codes: HashMap<&str, i64> = categories
                .iter()
                .enumerate()
                .map(|(code, value)| (value.as_str(), code as i64))
                .collect();
            cells
                .iter()
                .map(|cell| match cell {
                    Some(text) => codes
                        .get(text.as_str())
                        .map(|c| Value::Int(*c))
                        .unwrap_or(Value::Missing),
                    None => Value::Missing,
                })
                .collect()
        };

        result.insert_column(Column::integer(name.clone(), values))?;
        params.push(ColumnCategories {
            column: name.clone(),
            categories,
            indicators: Vec::new(),
        });
    }

    Ok((result, params))
}

fn one_hot_encode(table: &Table, targets: &[String]) -> Result<(Table, Vec<ColumnCategories>)> {
    let mut kept: Vec<Column> = table
        .columns()
        .filter(|c| !targets.contains(&c.name))
        .cloned()
        .collect();
    let mut taken: BTreeSet<String> = kept.iter().map(|c| c.name.clone()).collect();
    let mut indicators_out = Vec::new();
    let mut params = Vec::with_capacity(targets.len());

    for name in targets {
        let cells = as_text(table.require(name)?);
        let categories = sorted_categories(&cells);
        let mut indicator_names = Vec::with_capacity(categories.len());

        for category in &categories {
            let indicator = format!("{}_{}", name, category);
            if !taken.insert(indicator.clone()) {
                return Err(PrepError::Schema(format!(
                    "One-hot column '{}' would collide with an existing column",
                    indicator
                )));
            }
            let values = cells
                .iter()
                .map(|cell| Value::Int(i64::from(cell.as_deref() == Some(category.as_str()))))
                .collect();
            indicators_out.push(Column::new(indicator.clone(), ColumnType::Integer, values));
            indicator_names.push(indicator);
        }

        params.push(ColumnCategories {
            column: name.clone(),
            categories,
            indicators: indicator_names,
        });
    }

    kept.extend(indicators_out);
    let result = Table::with_index(table.index().to_vec(), kept)?;
    Ok((result, params))
}
