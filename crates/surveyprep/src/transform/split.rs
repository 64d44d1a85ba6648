//! Seeded train/test partition report.

use crate::error::{PrepError, Result};
use crate::table::Table;

use super::operations::{Outcome, Report, SplitReport};

/// Smallest accepted test fraction.
pub const MIN_TEST_FRACTION: f64 = 0.1;
/// Largest accepted test fraction.
pub const MAX_TEST_FRACTION: f64 = 0.4;

/// Shuffle the rows with `seed` and report the partition sizes and membership.
///
/// `test = round(rows * test_fraction)`. The table itself is returned as is:
/// the partitions are reported, never materialized, so any scaling or encoding
/// applied earlier was fit on all rows.
pub fn split(table: &Table, test_fraction: f64, seed: u64) -> Result<Outcome> {
    if !(MIN_TEST_FRACTION..=MAX_TEST_FRACTION).contains(&test_fraction) {
        return Err(PrepError::Parameter(format!(
            "Test fraction must be between {} and {}, got {}",
            MIN_TEST_FRACTION, MAX_TEST_FRACTION, test_fraction
        )));
    }

    let rows = table.row_count();
    if rows == 0 {
        return Ok(Outcome::vacuous(table.clone(), "The table has no rows to split"));
    }

    let mut order: Vec<usize> = (0..rows).collect();
    let mut rng = fastrand::Rng::with_seed(seed);
    rng.shuffle(&mut order);

    let test_rows = ((rows as f64) * test_fraction).round_ties_even() as usize;
    let train_rows = rows - test_rows;

    let index = table.index();
    let test_index: Vec<i64> = order[..test_rows].iter().map(|&p| index[p]).collect();
    let train_index: Vec<i64> = order[test_rows..].iter().map(|&p| index[p]).collect();

    tracing::debug!(rows, train_rows, test_rows, seed, "split table");

    let message = format!(
        "Train rows: {}, test rows: {}. Partitions are reported only; earlier steps were fit on all rows",
        train_rows, test_rows
    );
    Ok(Outcome::new(
        table.clone(),
        Report::Split(SplitReport {
            test_fraction,
            seed,
            train_rows,
            test_rows,
            train_index,
            test_index,
        }),
        message,
    ))
}
