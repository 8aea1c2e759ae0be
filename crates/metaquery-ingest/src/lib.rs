//! Metadata ingestion for Meta Query
//!
//! Metadata files are newline-delimited JSON, loosely: a line is a fact row
//! when it starts with a JSON array of the store's arity, and opaque text
//! otherwise. Opaque lines, including lines that are not UTF-8, are never an
//! error; they are skipped when loading and passed through when annotating.

pub mod line;
pub mod source;

pub use line::{parse_bytes, parse_line, raw_lines, ParsedLine};
pub use source::{load_all, load_source, rows_from_reader, IngestError, Source};
