//! Equal-width binning of a numeric column.

use crate::error::{PrepError, Result};
use crate::table::{Column, Table, Value, format_float};

use super::operations::{DiscretizeReport, Outcome, Report};

/// Suffix of the column produced by [`discretize`].
pub const BINNED_SUFFIX: &str = "_binned";

/// Share of the range the lowest edge is pushed down so the minimum falls in the first bin.
const EDGE_ADJUSTMENT: f64 = 0.001;

/// Largest bin count accepted.
pub const MAX_BINS: usize = 10_000;

/// Bin `column` into `bin_count` equal-width, right-closed intervals.
///
/// The result is a new categorical column `<column>_binned`, appended (or
/// replaced when it already exists). The source column is kept.
pub fn discretize(table: &Table, column: &str, bin_count: i64) -> Result<Outcome> {
    let source = table.require(column)?;
    let bins = match usize::try_from(bin_count) {
        Ok(bins) if (1..=MAX_BINS).contains(&bins) => bins,
        _ => {
            return Err(PrepError::Parameter(format!(
                "Bin count must be between 1 and {}, got {}",
                MAX_BINS, bin_count
            )));
        }
    };
    if !source.is_numeric() {
        return Err(PrepError::Schema(format!(
            "Column '{}' is {}, not numeric",
            column, source.kind
        )));
    }

    let numbers = source.numeric_values();
    if numbers.is_empty() {
        return Ok(Outcome::vacuous(
            table.clone(),
            format!("Column '{}' has no values to bin", column),
        ));
    }

    let edges = bin_edges(&numbers, bins);
    let labels = interval_labels(&edges);

    let values = source
        .values
        .iter()
        .map(|v| match v.as_f64() {
            Some(x) => bin_of(&edges, x)
                .map(|i| Value::text(labels[i].clone()))
                .unwrap_or(Value::Missing),
            None => Value::Missing,
        })
        .collect();

    let new_column = format!("{}{}", column, BINNED_SUFFIX);
    let mut result = table.clone();
    result.insert_column(Column::categorical(new_column.clone(), values, labels.clone()))?;

    tracing::debug!(column, bins, "discretized column");

    let message = format!(
        "Discretized '{}' into {} bins as '{}'",
        column, bins, new_column
    );
    Ok(Outcome::new(
        result,
        Report::Discretize(DiscretizeReport {
            column: column.to_string(),
            new_column,
            edges,
            labels,
        }),
        message,
    ))
}

/// `bins + 1` edges over the observed range, lowest edge widened.
fn bin_edges(numbers: &[f64], bins: usize) -> Vec<f64> {
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        let adj = if min != 0.0 {
            min.abs() * EDGE_ADJUSTMENT
        } else {
            EDGE_ADJUSTMENT
        };
        return linspace(min - adj, max + adj, bins);
    }

    let mut edges = linspace(min, max, bins);
    edges[0] -= (max - min) * EDGE_ADJUSTMENT;
    edges
}

fn linspace(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
    edges[bins] = hi;
    edges
}

/// Index of the right-closed interval containing `x`.
fn bin_of(edges: &[f64], x: f64) -> Option<usize> {
    edges
        .windows(2)
        .position(|w| x > w[0] && x <= w[1])
}

/// `"(lo, hi]"` labels, using the fewest decimals (at least 3 significant) that keep them distinct.
fn interval_labels(edges: &[f64]) -> Vec<String> {
    let mut precision = 3;
    let rounded = loop {
        let rounded: Vec<f64> = edges.iter().map(|e| round_frac(*e, precision)).collect();
        let distinct = rounded.windows(2).all(|w| w[0] != w[1]);
        if distinct || precision >= 15 {
            break rounded;
        }
        precision += 1;
    };

    rounded
        .windows(2)
        .map(|w| format!("({}, {}]", format_float(w[0]), format_float(w[1])))
        .collect()
}

/// Round to `precision` decimals, counting from the first significant digit for values below 1.
fn round_frac(x: f64, precision: i32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let whole = x.trunc();
    let digits = if whole == 0.0 {
        -(x.fract().abs().log10().floor() as i32) - 1 + precision
    } else {
        precision
    };
    let digits = digits.max(0) as usize;
    format!("{:.*}", digits, x).parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;

    fn ages() -> Table {
        Table::from_columns(vec![
            Column::integer(
                "Age",
                vec![
                    Value::Int(18),
                    Value::Int(25),
                    Value::Missing,
                    Value::Int(40),
                    Value::Int(72),
                ],
            ),
            Column::new(
                "Gender",
                ColumnType::Categorical,
                vec![Value::text("Male"); 5],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_five_bins_cover_range() {
        let out = discretize(&ages(), "Age", 5).unwrap();
        let binned = out.table.column("Age_binned").unwrap();

        assert_eq!(binned.kind, ColumnType::Categorical);
        assert_eq!(binned.levels.len(), 5);
        assert_eq!(
            binned.levels,
            vec![
                "(17.946, 28.8]",
                "(28.8, 39.6]",
                "(39.6, 50.4]",
                "(50.4, 61.2]",
                "(61.2, 72.0]"
            ]
        );
        assert_eq!(binned.values[0], Value::text("(17.946, 28.8]"));
        assert_eq!(binned.values[2], Value::Missing);
        assert_eq!(binned.values[4], Value::text("(61.2, 72.0]"));
        // Source column is kept.
        assert!(out.table.has_column("Age"));
        assert_eq!(out.table.column_names().last().unwrap(), "Age_binned");
    }

    #[test]
    fn test_text_column_is_schema_error() {
        let result = discretize(&ages(), "Gender", 5);
        assert!(matches!(result, Err(PrepError::Schema(_))));
    }

    #[test]
    fn test_non_positive_bins() {
        assert!(matches!(
            discretize(&ages(), "Age", 0),
            Err(PrepError::Parameter(_))
        ));
    }

    #[test]
    fn test_oversized_bins_rejected() {
        for bins in [MAX_BINS as i64 + 1, 1_000_000_000, i64::MAX] {
            assert!(matches!(
                discretize(&ages(), "Age", bins),
                Err(PrepError::Parameter(_))
            ));
        }
        let out = discretize(&ages(), "Age", MAX_BINS as i64).unwrap();
        assert_eq!(out.table.column("Age_binned").unwrap().levels.len(), MAX_BINS);
    }

    #[test]
    fn test_constant_column() {
        let table = Table::from_columns(vec![Column::integer("x", vec![Value::Int(5); 3])]).unwrap();
        let out = discretize(&table, "x", 1).unwrap();
        let binned = out.table.column("x_binned").unwrap();
        assert_eq!(binned.levels, vec!["(4.995, 5.005]"]);
        assert!(binned.values.iter().all(|v| *v == Value::text("(4.995, 5.005]")));

        let zeros = Table::from_columns(vec![Column::integer("z", vec![Value::Int(0); 2])]).unwrap();
        let out = discretize(&zeros, "z", 1).unwrap();
        assert_eq!(out.table.column("z_binned").unwrap().levels, vec!["(-0.001, 0.001]"]);
    }

    #[test]
    fn test_rebinning_replaces_column() {
        let once = discretize(&ages(), "Age", 5).unwrap().table;
        let twice = discretize(&once, "Age", 3).unwrap().table;
        assert_eq!(twice.column_count(), once.column_count());
        assert_eq!(twice.column("Age_binned").unwrap().levels.len(), 3);
    }

    #[test]
    fn test_round_frac() {
        assert_eq!(round_frac(17.946_000_1, 3), 17.946);
        assert_eq!(round_frac(0.000_123_45, 3), 0.000_123);
    }
}
