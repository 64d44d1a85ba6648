//! API request handlers.

mod operations;
mod profile;
mod sessions;

pub use operations::*;
pub use profile::*;
pub use sessions::*;
