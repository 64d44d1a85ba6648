//! Per-column statistics and pairwise correlation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{Column, Table};
use crate::transform::{mean, median};

use super::summary::percent;

/// Number of categories listed in a categorical distribution.
pub const TOP_CATEGORIES: usize = 10;

/// Statistics for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    pub missing: usize,
    pub missing_pct: f64,
}

impl NumericStatistics {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// One category and how often it occurs among present values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// Share of present values, in percent.
    pub percentage: f64,
}

/// Statistics for categorical and text columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStatistics {
    pub total: usize,
    pub valid: usize,
    pub unique: usize,
    pub most_common: CategoryCount,
    pub missing: usize,
    pub missing_pct: f64,
    /// Most frequent categories, at most [`TOP_CATEGORIES`].
    pub distribution: Vec<CategoryCount>,
}

/// Statistics for one column, by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStatistics),
    Categorical(CategoricalStatistics),
    /// No present values to describe.
    Empty { missing: usize },
}

impl ColumnStats {
    /// Describe the named column.
    pub fn of(table: &Table, column: &str) -> Result<Self> {
        Ok(Self::of_column(table.require(column)?))
    }

    pub fn of_column(column: &Column) -> Self {
        let missing = column.missing_count();
        if column.present_count() == 0 {
            return ColumnStats::Empty { missing };
        }
        if column.is_numeric() {
            ColumnStats::Numeric(numeric_stats(column))
        } else {
            ColumnStats::Categorical(categorical_stats(column))
        }
    }
}

fn numeric_stats(column: &Column) -> NumericStatistics {
    let mut values = column.numeric_values();
    let count = values.len();
    let mean = mean(&values).unwrap_or(f64::NAN);
    let median = median(&mut values).unwrap_or(f64::NAN);
    // `median` sorted the values.
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };
    let missing = column.missing_count();

    NumericStatistics {
        count,
        mean,
        median,
        std,
        min: values[0],
        max: values[count - 1],
        q1: quantile(&values, 0.25),
        q3: quantile(&values, 0.75),
        missing,
        missing_pct: percent(missing, column.len()),
    }
}

/// Linear-interpolated quantile of sorted, non-empty values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

fn categorical_stats(column: &Column) -> CategoricalStatistics {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in column.values.iter().filter_map(|v| v.render()) {
        *counts.entry(text).or_default() += 1;
    }
    let valid = column.present_count();

    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value,
            count,
            percentage: percent(count, valid),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    let unique = ranked.len();
    let most_common = ranked[0].clone();
    ranked.truncate(TOP_CATEGORIES);
    let missing = column.missing_count();

    CategoricalStatistics {
        total: column.len(),
        valid,
        unique,
        most_common,
        missing,
        missing_pct: percent(missing, column.len()),
        distribution: ranked,
    }
}

/// Pairwise Pearson correlation over the numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is absent when fewer than two rows pair up or a side is constant.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn of(table: &Table) -> Self {
        let numeric: Vec<&Column> = table.columns().filter(|c| c.is_numeric()).collect();
        let values = numeric
            .iter()
            .map(|a| numeric.iter().map(|b| pearson(a, b)).collect())
            .collect();
        Self {
            columns: numeric.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    /// Correlation between two named columns, if both are in the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Pearson correlation over rows where both cells are present.
fn pearson(a: &Column, b: &Column) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .values
        .iter()
        .zip(&b.values)
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnType, Value};

    #[test]
    fn test_numeric_stats() {
        let col = Column::integer(
            "Age",
            vec![Value::Int(10), Value::Int(20), Value::Int(30), Value::Int(40), Value::Missing],
        );
        let ColumnStats::Numeric(stats) = ColumnStats::of_column(&col) else {
            panic!("expected numeric stats");
        };
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.median, 25.0);
        assert_eq!(stats.q1, 17.5);
        assert_eq!(stats.q3, 32.5);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.iqr(), 15.0);
        assert_eq!(stats.missing_pct, 20.0);
        let std = stats.std.unwrap();
        assert!((std - 12.909_944).abs() < 1e-6);
    }

    #[test]
    fn test_categorical_stats() {
        let col = Column::new(
            "Gender",
            ColumnType::Categorical,
            vec![
                Value::text("Male"),
                Value::text("Female"),
                Value::text("Male"),
                Value::Missing,
            ],
        );
        let ColumnStats::Categorical(stats) = ColumnStats::of_column(&col) else {
            panic!("expected categorical stats");
        };
        assert_eq!(stats.total, 4);
        assert_eq!(stats.valid, 3);
        assert_eq!(stats.unique, 2);
        assert_eq!(stats.most_common.value, "Male");
        assert_eq!(stats.most_common.count, 2);
        assert_eq!(stats.distribution[1].value, "Female");
        assert_eq!(stats.missing_pct, 25.0);
    }

    #[test]
    fn test_empty_column() {
        let col = Column::integer("x", vec![Value::Missing; 2]);
        assert_eq!(ColumnStats::of_column(&col), ColumnStats::Empty { missing: 2 });
    }

    #[test]
    fn test_correlation() {
        let table = Table::from_columns(vec![
            Column::integer("a", vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Missing]),
            Column::integer("b", vec![Value::Int(2), Value::Int(4), Value::Int(6), Value::Int(100)]),
            Column::integer("c", vec![Value::Int(3), Value::Int(2), Value::Int(1), Value::Int(0)]),
            Column::new("t", ColumnType::Text, vec![Value::text("x"); 4]),
        ])
        .unwrap();
        let corr = CorrelationMatrix::of(&table);
        assert_eq!(corr.columns, vec!["a", "b", "c"]);
        assert!((corr.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((corr.get("a", "c").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(corr.get("a", "t"), None);
    }
}
