//! Z-score and min-max scaling of every numeric column.

use crate::table::{Column, ColumnType, Table, Value};

use super::missing::mean;
use super::operations::{ColumnScale, NormalizeMethod, Outcome, Report, ScalerParams};

/// Rescale every numeric column with `method`.
///
/// Scaled columns become float; missing cells stay missing. A column with
/// zero spread is scaled by 1. The fitted parameters are returned in the
/// report and are not kept anywhere else.
pub fn normalize(table: &Table, method: NormalizeMethod) -> Outcome {
    let targets: Vec<String> = table
        .columns()
        .filter(|c| c.is_numeric())
        .map(|c| c.name.clone())
        .collect();

    if targets.is_empty() {
        tracing::warn!("normalize found no numeric columns");
        return Outcome::vacuous(table.clone(), "No numeric columns to normalize");
    }

    let mut result = table.clone();
    let mut params = Vec::with_capacity(targets.len());

    for name in &targets {
        let Some(column) = result.column_mut(name) else {
            continue;
        };
        let scale = fit(column, method);
        apply(column, &scale);
        params.push(scale);
    }

    let message = format!(
        "Normalized {} numeric column(s) with {}: {}",
        targets.len(),
        method.as_str(),
        targets.join(", ")
    );
    Outcome::new(
        result,
        Report::Normalize(ScalerParams {
            method,
            columns: params,
        }),
        message,
    )
}

fn fit(column: &Column, method: NormalizeMethod) -> ColumnScale {
    let numbers = column.numeric_values();
    let (offset, spread) = match method {
        NormalizeMethod::Zscore => {
            let center = mean(&numbers).unwrap_or(0.0);
            let variance = mean(
                &numbers
                    .iter()
                    .map(|x| (x - center).powi(2))
                    .collect::<Vec<_>>(),
            )
            .unwrap_or(0.0);
            (center, variance.sqrt())
        }
        NormalizeMethod::Minmax => {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if numbers.is_empty() {
                (0.0, 1.0)
            } else {
                (min, max - min)
            }
        }
    };

    ColumnScale {
        column: column.name.clone(),
        offset,
        scale: if spread == 0.0 { 1.0 } else { spread },
    }
}

fn apply(column: &mut Column, scale: &ColumnScale) {
    column.kind = ColumnType::Float;
    for cell in column.values.iter_mut() {
        *cell = match cell.as_f64() {
            Some(x) => Value::float((x - scale.offset) / scale.scale),
            None => Value::Missing,
        };
    }
}
