use crate::render::{row_id_suffix, Renderer};
use metaquery_store::Term;
use std::io::{self, Write};
use tracing::warn;

impl Renderer<'_> {
    /// Element name, one indented line per attribute row, then a blank line.
    ///
    /// A row that cannot be rendered shows the error in place of its value.
    pub fn dump(&self, element: &Term) -> String {
        let mut out = self.name_of(element);
        out.push('\n');
        for entry in self.store().attributes_of(element) {
            let line = self
                .attribute_line(entry.attribute, entry.value, entry.row_id)
                .unwrap_or_else(|err| {
                    warn!(element = %element, attribute = %entry.attribute, "{err}");
                    format!(
                        "{} = <error: {err}>{}",
                        self.name_of(entry.attribute),
                        row_id_suffix(entry.row_id)
                    )
                });
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
        out
    }

    /// Dump `elements` in the given order.
    pub fn write_dump<'t, W, I>(&self, out: &mut W, elements: I) -> io::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'t Term>,
    {
        for element in elements {
            out.write_all(self.dump(element).as_bytes())?;
        }
        Ok(())
    }

    /// Dump every element of the store, in first-appearance order.
    pub fn write_dump_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_dump(out, self.store().all_elements())
    }
}

#[cfg(test)]
mod tests {
    use crate::Renderer;
    use metaquery_store::{FactStore, Row, RowShape, Term};

    #[test]
    fn dump_lists_attributes_in_row_order() {
        let store = FactStore::new(
            RowShape::Triple,
            vec![
                Row::triple("0", "0", "identifier"),
                Row::triple("0", "1", "2"),
                Row::triple("1", "0", "value-type"),
                Row::triple("1", "1", "3"),
                Row::triple("2", "0", "String"),
                Row::triple("3", "0", "Reference"),
                Row::triple("0", "9", "note"),
            ],
        );
        let r = Renderer::new(&store);
        assert_eq!(
            r.dump(&Term::from("0")),
            "identifier(0)\n  identifier(0) = \"identifier\"\n  value-type(1) = String(2)\n  (9) = [\"note\"]\n\n"
        );
    }

    #[test]
    fn dump_of_unknown_element_is_just_its_name() {
        let store = FactStore::empty(RowShape::Triple);
        assert_eq!(Renderer::new(&store).dump(&Term::from(5)), "(5)\n\n");
    }

    #[test]
    fn quad_dump_carries_row_ids() {
        let store = FactStore::new(
            RowShape::Quad,
            vec![
                Row::quad("a", "0", "identifier", 1),
                Row::quad("a", "a", "identifier", 2),
                Row::quad("s", "a", "String", 3),
                Row::quad("vt", "a", "attribute/value-type", 4),
                Row::quad("a", "vt", "s", 5),
            ],
        );
        let out = Renderer::new(&store).dump(&Term::from("a"));
        assert_eq!(
            out,
            "identifier(a)\n  (0) = [\"identifier\"] {rowid=1}\n  identifier(a) = \"identifier\" {rowid=2}\n  attribute/value-type(vt) = [\"s\"] {rowid=5}\n\n"
        );
    }

    #[test]
    fn render_errors_are_contained_in_the_dump() {
        let store = FactStore::new(
            RowShape::Triple,
            vec![
                Row::triple("1", "0", "value-type"),
                Row::triple("3", "0", "Reference"),
                Row::triple("7", "1", "3"),
                Row::triple("x", "7", Term::new(serde_json::json!({"not": "an id"}))),
            ],
        );
        let out = Renderer::new(&store).dump(&Term::from("x"));
        assert!(out.starts_with("(x)\n  (7) = <error: "));
        assert!(out.ends_with(">\n\n"));
    }

    #[test]
    fn quad_render_errors_keep_the_row_id() {
        let store = FactStore::new(
            RowShape::Quad,
            vec![
                Row::quad("a", "0", "identifier", 1),
                Row::quad("r", "a", "Reference", 2),
                Row::quad("vt", "a", "attribute/value-type", 3),
                Row::quad("p", "vt", "r", 4),
                Row::quad("x", "p", Term::new(serde_json::json!([1, 2])), 9),
            ],
        );
        let out = Renderer::new(&store).dump(&Term::from("x"));
        assert!(out.starts_with("(x)\n  (p) = <error: "));
        assert!(out.ends_with("> {rowid=9}\n\n"));
    }

    #[test]
    fn dump_all_covers_every_element_once() {
        let store = FactStore::new(
            RowShape::Triple,
            vec![
                Row::triple("b", "0", "B"),
                Row::triple("a", "0", "A"),
                Row::triple("b", "0", "B2"),
            ],
        );
        let mut out = Vec::new();
        Renderer::new(&store).write_dump_all(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("B(b)\n"));
        assert_eq!(text.matches("(a)\n").count(), 1);
        assert_eq!(text.matches("\n\n").count(), 2);
    }
}
