//! Bootstrap conventions and the resolved well-known elements.
//!
//! The store has no out-of-band schema. Which attribute carries an element's
//! human-readable identifier, and which elements stand for `value-type`,
//! `String` and `Reference`, is itself stored as facts. A small set of
//! hardcoded conventions is enough to find them.

use crate::pattern::Pattern;
use crate::row::RowShape;
use crate::store::FactStore;
use crate::term::Term;
use tracing::debug;

/// Well-known identifier attribute id used by both row shapes.
pub const IDENTIFIER_ATTRIBUTE: &str = "0";

/// Identifier string of the identifier attribute itself (quad bootstrap).
pub const IDENTIFIER_NAME: &str = "identifier";

pub const VALUE_TYPE_NAME: &str = "value-type";
pub const QUAD_VALUE_TYPE_NAME: &str = "attribute/value-type";
pub const STRING_NAME: &str = "String";
pub const REFERENCE_NAME: &str = "Reference";

/// Where the identifier attribute id comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierSource {
    /// Taken as-is, no lookup.
    Constant(Term),
    /// The element `x` of the first row `(x, bootstrap, name, _)`. Falls back
    /// to `bootstrap` when no such row exists.
    Discovered { bootstrap: Term, name: String },
}

/// Hardcoded names the bootstrap queries look for.
#[derive(Debug, Clone, PartialEq)]
pub struct Conventions {
    pub identifier: IdentifierSource,
    pub value_type_name: String,
    pub string_name: String,
    pub reference_name: String,
}

impl Conventions {
    pub fn triple() -> Self {
        Self {
            identifier: IdentifierSource::Constant(Term::from(IDENTIFIER_ATTRIBUTE)),
            value_type_name: VALUE_TYPE_NAME.to_string(),
            string_name: STRING_NAME.to_string(),
            reference_name: REFERENCE_NAME.to_string(),
        }
    }

    pub fn quad() -> Self {
        Self {
            identifier: IdentifierSource::Discovered {
                bootstrap: Term::from(IDENTIFIER_ATTRIBUTE),
                name: IDENTIFIER_NAME.to_string(),
            },
            value_type_name: QUAD_VALUE_TYPE_NAME.to_string(),
            string_name: STRING_NAME.to_string(),
            reference_name: REFERENCE_NAME.to_string(),
        }
    }

    pub fn for_shape(shape: RowShape) -> Self {
        match shape {
            RowShape::Triple => Self::triple(),
            RowShape::Quad => Self::quad(),
        }
    }

    /// Replace the identifier attribute id (or the quad bootstrap constant).
    pub fn with_identifier_attribute(mut self, id: impl Into<Term>) -> Self {
        let id = id.into();
        self.identifier = match self.identifier {
            IdentifierSource::Constant(_) => IdentifierSource::Constant(id),
            IdentifierSource::Discovered { name, .. } => {
                IdentifierSource::Discovered { bootstrap: id, name }
            }
        };
        self
    }
}

/// Resolved schema: the well-known element ids, each absent when the
/// corresponding bootstrap query found nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WellKnown {
    pub identifier: Option<Term>,
    pub value_type: Option<Term>,
    pub string: Option<Term>,
    pub reference: Option<Term>,
}

impl WellKnown {
    /// Run the bootstrap queries against an already loaded store.
    ///
    /// The identifier attribute is resolved first; the other three are then
    /// looked up through it.
    pub fn resolve(store: &FactStore, conventions: &Conventions) -> Self {
        let identifier = match &conventions.identifier {
            IdentifierSource::Constant(id) => Some(id.clone()),
            IdentifierSource::Discovered { bootstrap, name } => {
                let found = first(
                    "identifier",
                    store.elements_identified_by(bootstrap, name.as_str()),
                );
                Some(found.unwrap_or_else(|| bootstrap.clone()))
            }
        };

        let lookup = |label: &str, name: &str| {
            let id = identifier.as_ref()?;
            first(label, store.elements_identified_by(id, name))
        };

        let resolved = Self {
            value_type: lookup("value-type", &conventions.value_type_name),
            string: lookup("String", &conventions.string_name),
            reference: lookup("Reference", &conventions.reference_name),
            identifier: identifier.clone(),
        };

        debug!(
            identifier = ?resolved.identifier.as_ref().map(Term::to_json),
            value_type = ?resolved.value_type.as_ref().map(Term::to_json),
            string = ?resolved.string.as_ref().map(Term::to_json),
            reference = ?resolved.reference.as_ref().map(Term::to_json),
            "bootstrap resolved well-known elements"
        );
        resolved
    }

    pub fn is_complete(&self) -> bool {
        self.identifier.is_some()
            && self.value_type.is_some()
            && self.string.is_some()
            && self.reference.is_some()
    }
}

fn first(label: &str, mut candidates: Vec<&Term>) -> Option<Term> {
    if candidates.len() > 1 {
        debug!(
            well_known = label,
            candidates = candidates.len(),
            "several elements match a well-known name; using the first"
        );
    }
    if candidates.is_empty() {
        debug!(well_known = label, "well-known element not found");
        return None;
    }
    Some(candidates.swap_remove(0).clone())
}

impl FactStore {
    /// Elements `x` of rows `(x, identifier_attribute, name[, _])`.
    pub(crate) fn elements_identified_by(
        &self,
        identifier_attribute: &Term,
        name: &str,
    ) -> Vec<&Term> {
        self.lookup(
            &Pattern::any()
                .attribute(identifier_attribute.clone())
                .value(name),
        )
        .into_iter()
        .map(|row| &row.element)
        .collect()
    }
}
