//! Read-only reports over the working table.

mod stats;
mod summary;

pub use stats::{
    CategoricalStatistics, CategoryCount, ColumnStats, CorrelationMatrix, NumericStatistics,
    TOP_CATEGORIES,
};
pub use summary::{ColumnDtype, ColumnMissing, DtypeSummary, MissingSummary};
