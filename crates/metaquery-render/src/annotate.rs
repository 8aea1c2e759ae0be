use crate::render::Renderer;
use metaquery_ingest::{parse_bytes, parse_line, raw_lines, ParsedLine};
use metaquery_store::Row;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Prefix of the suffix appended to row lines.
pub const ANNOTATION_MARKER: &str = "//=>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Drop lines that are not rows instead of passing them through.
    pub only_meta: bool,
}

impl Renderer<'_> {
    /// Annotate one input line.
    ///
    /// Rows of the store's shape get `  //=> <fact line>` appended (or the
    /// render error, if the row cannot be rendered). Other lines come back
    /// unchanged, or `None` with [`AnnotateOptions::only_meta`].
    pub fn annotate(&self, line: &str, options: &AnnotateOptions) -> Option<String> {
        match parse_line(line, self.store().shape()) {
            ParsedLine::Row(row) => Some(format!("{line}{}", self.annotation(&row))),
            ParsedLine::Opaque(_) if options.only_meta => None,
            ParsedLine::Opaque(_) => Some(line.to_string()),
        }
    }

    /// [`annotate`](Self::annotate) over undecoded bytes. Opaque lines come
    /// back byte-for-byte, whether or not they are UTF-8.
    pub fn annotate_bytes(&self, line: &[u8], options: &AnnotateOptions) -> Option<Vec<u8>> {
        match parse_bytes(line, self.store().shape()) {
            ParsedLine::Row(row) => {
                let mut out = line.to_vec();
                out.extend_from_slice(self.annotation(&row).as_bytes());
                Some(out)
            }
            ParsedLine::Opaque(_) if options.only_meta => None,
            ParsedLine::Opaque(bytes) => Some(bytes.to_vec()),
        }
    }

    /// Annotate a whole stream, line by line, preserving order. Lines are
    /// written back with a `\n` terminator.
    pub fn annotate_reader<R, W>(
        &self,
        reader: R,
        out: &mut W,
        options: &AnnotateOptions,
    ) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in raw_lines(reader) {
            let line = line?;
            if let Some(annotated) = self.annotate_bytes(&line, options) {
                out.write_all(&annotated)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn annotation(&self, row: &Row) -> String {
        let rendered = match self.fact_line(row) {
            Ok(fact) => fact,
            Err(err) => {
                debug!(
                    element = %row.element,
                    attribute = %row.attribute,
                    "annotation failed: {err}"
                );
                format!("error: {err}")
            }
        };
        format!("  {ANNOTATION_MARKER} {rendered}")
    }
}
