//! Best-effort row-literal parsing.

use metaquery_store::{Row, RowShape, Term};
use serde_json::Deserializer;
use std::io::{self, BufRead};

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine<'a> {
    Row(Row),
    /// Not a row of the requested shape (blank, log text, comment, wrong
    /// arity, not UTF-8). Holds the line's raw bytes.
    Opaque(&'a [u8]),
}

impl ParsedLine<'_> {
    pub fn is_row(&self) -> bool {
        matches!(self, ParsedLine::Row(_))
    }
}

/// Parse the first JSON value on `line` as a row of `shape`.
///
/// Anything after the array is ignored, so `["0", "0", "identifier"] ;; note`
/// is still a row.
pub fn parse_line(line: &str, shape: RowShape) -> ParsedLine<'_> {
    parse_bytes(line.as_bytes(), shape)
}

/// [`parse_line`] over undecoded bytes. Lines that are not valid UTF-8 are
/// opaque unless the row literal itself decodes and only the trailing text
/// is garbage.
pub fn parse_bytes(line: &[u8], shape: RowShape) -> ParsedLine<'_> {
    let mut values = Deserializer::from_slice(line).into_iter::<Vec<Term>>();
    match values.next() {
        Some(Ok(terms)) => match Row::from_terms(shape, terms) {
            Some(row) => ParsedLine::Row(row),
            None => ParsedLine::Opaque(line),
        },
        _ => ParsedLine::Opaque(line),
    }
}

/// Lines of `reader` as raw bytes, without the `\n` or `\r\n` terminator.
///
/// Only real read failures are errors; content is never decoded here.
pub fn raw_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            bytes
        })
    })
}
