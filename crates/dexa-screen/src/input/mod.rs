//! Input parsing and data source handling.

mod parser;
mod source;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::{Dataset, SourceMetadata};
pub use value::Value;
