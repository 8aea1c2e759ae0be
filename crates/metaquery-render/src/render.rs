use crate::error::RenderError;
use metaquery_store::{FactStore, Row, Term};

/// How an attribute's values are shown, from its declared value-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The value is an element id; show its name.
    Reference,
    /// Quoted, escaped string literal.
    String,
    /// No usable value-type: `[<json>]`.
    Blob,
}

/// Formats names, values and rows by reading through a [`FactStore`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'s> {
    store: &'s FactStore,
}

impl<'s> Renderer<'s> {
    pub fn new(store: &'s FactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'s FactStore {
        self.store
    }

    /// `<first identifier>(<element>)`, or `(<element>)` when the element has
    /// no identifier.
    pub fn name_of(&self, element: &Term) -> String {
        let identifiers = self.store.identifiers_of(element);
        match identifiers.first() {
            Some(identifier) => format!("{identifier}({element})"),
            None => format!("({element})"),
        }
    }

    /// The first declared value-type of `attribute`, classified against the
    /// well-known `String` and `Reference` elements.
    pub fn value_kind(&self, attribute: &Term) -> ValueKind {
        let well_known = self.store.well_known();
        let Some(value_type) = &well_known.value_type else {
            return ValueKind::Blob;
        };
        let declared = self.store.attribute_value(attribute, value_type);
        let Some(&declared) = declared.first() else {
            return ValueKind::Blob;
        };

        if well_known.reference.as_ref() == Some(declared) {
            ValueKind::Reference
        } else if well_known.string.as_ref() == Some(declared) {
            ValueKind::String
        } else {
            ValueKind::Blob
        }
    }

    pub fn value_of(&self, attribute: &Term, raw: &Term) -> Result<String, RenderError> {
        match self.value_kind(attribute) {
            ValueKind::Reference if raw.is_scalar() => Ok(self.name_of(raw)),
            ValueKind::Reference => Err(RenderError::NonScalarReference {
                attribute: self.name_of(attribute),
                value: raw.to_json(),
            }),
            ValueKind::String => Ok(raw.to_json()),
            ValueKind::Blob => Ok(blob(raw)),
        }
    }

    /// `<attribute name> = <value>[ {rowid=N}]`
    pub fn attribute_line(
        &self,
        attribute: &Term,
        value: &Term,
        row_id: Option<&Term>,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "{} = {}{}",
            self.name_of(attribute),
            self.value_of(attribute, value)?,
            row_id_suffix(row_id)
        ))
    }

    /// `<element name>.<attribute name> = <value>[ {rowid=N}]`
    pub fn fact_line(&self, row: &Row) -> Result<String, RenderError> {
        Ok(format!(
            "{}.{}",
            self.name_of(&row.element),
            self.attribute_line(&row.attribute, &row.value, row.row_id.as_ref())?
        ))
    }
}

fn blob(raw: &Term) -> String {
    format!("[{}]", raw.to_json())
}

pub(crate) fn row_id_suffix(row_id: Option<&Term>) -> String {
    match row_id {
        Some(id) => format!(" {{rowid={id}}}"),
        None => String::new(),
    }
}
