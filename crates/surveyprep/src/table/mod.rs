//! The semantic table model: typed columns of tagged cells.

mod column;
mod frame;
mod types;
mod value;
pub mod wire;

pub use column::Column;
pub use frame::Table;
pub use types::{ColumnType, TargetType};
pub use value::{
    CSV_DATETIME_FORMAT, Value, WIRE_DATETIME_FORMAT, format_float, parse_bool, parse_datetime,
    parse_integer, parse_number, truncate_to_i64,
};
pub use wire::{WireTable, from_json, from_json_with_types, to_json};
