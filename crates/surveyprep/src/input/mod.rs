//! Byte decoding, delimited parsing and source metadata.

mod decode;
mod parser;
mod source;

pub use decode::{Encoding, decode};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
