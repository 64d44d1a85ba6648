//! Preprocessing operations applied to the working table.

mod discretize;
mod encode;
mod engine;
mod missing;
mod normalize;
mod operations;
mod split;

pub use discretize::{BINNED_SUFFIX, MAX_BINS, discretize};
pub use encode::encode;
pub use engine::TransformEngine;
pub use missing::{MissingTarget, handle_missing};
pub use normalize::normalize;
pub use operations::{
    ALL_COLUMNS, ColumnCategories, ColumnScale, ConvertReport, DiscretizeReport, DropReport,
    EncodeMethod, EncoderParams, MissingMethod, MissingReport, NormalizeMethod, Operation,
    Outcome, Report, ScalerParams, SplitReport,
};
pub use split::{MAX_TEST_FRACTION, MIN_TEST_FRACTION, split};

pub(crate) use missing::{mean, median};
