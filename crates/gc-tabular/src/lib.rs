//! gc-tabular: lenient delimited-text parsing for reference tables.
//!
//! Reference data is trusted but imperfect: files may carry leading
//! metadata rows, blank lines, and Windows line endings. The parser here
//! never errors; header location is a separate scan so callers can skip
//! anything above the real header row.

pub mod header;
pub mod parser;

pub use header::{HeaderMap, find_header_row};
pub use parser::parse;
