//! Metadata sources: files or stdin.

use crate::line::{parse_bytes, raw_lines, ParsedLine};
use metaquery_store::{Row, RowShape};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Reading a source failed. Always fatal for the run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {source_name}: {error}")]
    Open {
        source_name: String,
        #[source]
        error: io::Error,
    },
    #[error("cannot read {source_name}: {error}")]
    Read {
        source_name: String,
        #[source]
        error: io::Error,
    },
}

/// Where lines come from. `-` on the command line means stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Stdin,
}

impl Source {
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::Path(arg.to_path_buf())
        }
    }

    /// Open the source for line-by-line reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>, IngestError> {
        match self {
            Source::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Source::Path(path) => {
                let file = File::open(path).map_err(|error| IngestError::Open {
                    source_name: self.to_string(),
                    error,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Collect every row of `shape` from a reader; other lines, including ones
/// that are not UTF-8, are skipped. Only read failures are errors.
pub fn rows_from_reader<R: BufRead>(reader: R, shape: RowShape) -> io::Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut opaque = 0usize;
    for line in raw_lines(reader) {
        let line = line?;
        match parse_bytes(&line, shape) {
            ParsedLine::Row(row) => rows.push(row),
            ParsedLine::Opaque(_) => opaque += 1,
        }
    }
    debug!(rows = rows.len(), opaque, "parsed reader");
    Ok(rows)
}

pub fn load_source(source: &Source, shape: RowShape) -> Result<Vec<Row>, IngestError> {
    let reader = source.open()?;
    let rows = rows_from_reader(reader, shape).map_err(|error| IngestError::Read {
        source_name: source.to_string(),
        error,
    })?;
    debug!(source = %source, rows = rows.len(), "loaded metadata source");
    Ok(rows)
}

/// Load every source in order and union their rows. Stops at the first
/// failing source.
pub fn load_all(sources: &[Source], shape: RowShape) -> Result<Vec<Row>, IngestError> {
    let mut rows = Vec::new();
    for source in sources {
        rows.extend(load_source(source, shape)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn reader_skips_opaque_lines() {
        let text = "\
[\"0\", \"0\", \"identifier\"]
not a row

[\"2\", \"0\", \"String\"] ;; trailing
";
        let rows = rows_from_reader(Cursor::new(text), RowShape::Triple).unwrap();
        assert_eq!(
            rows,
            vec![
                Row::triple("0", "0", "identifier"),
                Row::triple("2", "0", "String"),
            ]
        );
    }

    #[test]
    fn reader_tolerates_lines_that_are_not_utf8() {
        let text: &[u8] =
            b"[\"0\",\"0\",\"identifier\"]\nlog \xff\xfe garbage\n[\"2\",\"0\",\"String\"]\n";
        let rows = rows_from_reader(Cursor::new(text), RowShape::Triple).unwrap();
        assert_eq!(
            rows,
            vec![
                Row::triple("0", "0", "identifier"),
                Row::triple("2", "0", "String"),
            ]
        );
    }

    #[test]
    fn reader_accepts_crlf_line_endings() {
        let text = "[\"0\", \"0\", \"identifier\"]\r\nnot a row\r\n";
        let rows = rows_from_reader(Cursor::new(text), RowShape::Triple).unwrap();
        assert_eq!(rows, vec![Row::triple("0", "0", "identifier")]);
    }

    #[test]
    fn load_source_skips_binary_garbage_in_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.meta");
        std::fs::write(&path, b"\xc3\x28 broken\n[\"1\", \"0\", \"a\"]\n").unwrap();
        let rows = load_source(&Source::Path(path), RowShape::Triple).unwrap();
        assert_eq!(rows, vec![Row::triple("1", "0", "a")]);
    }

    #[test]
    fn load_all_unions_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.meta");
        let b = dir.path().join("b.meta");
        writeln!(File::create(&a).unwrap(), r#"["1", "0", "a"]"#).unwrap();
        writeln!(File::create(&b).unwrap(), r#"["2", "0", "b"]"#).unwrap();

        let rows = load_all(
            &[Source::Path(a), Source::Path(b.clone()), Source::Path(b)],
            RowShape::Triple,
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![
                Row::triple("1", "0", "a"),
                Row::triple("2", "0", "b"),
                Row::triple("2", "0", "b"),
            ]
        );
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.meta");
        let err = load_all(&[Source::Path(missing)], RowShape::Triple).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
        assert!(err.to_string().contains("missing.meta"));
    }

    #[test]
    fn zero_sources_yield_zero_rows() {
        assert!(load_all(&[], RowShape::Quad).unwrap().is_empty());
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(Source::from_arg(Path::new("-")), Source::Stdin);
        assert_eq!(
            Source::from_arg(Path::new("core.meta")),
            Source::Path(PathBuf::from("core.meta"))
        );
        assert_eq!(Source::Stdin.to_string(), "<stdin>");
    }
}
