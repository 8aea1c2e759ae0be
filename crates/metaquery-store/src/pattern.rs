//! Query patterns: one [`Slot`] per row position.

use crate::row::Row;
use crate::term::Term;

/// A pattern position. `Any` places no constraint; `Exactly` must equal the
/// row position (so `Exactly(null)` only matches a literal JSON `null`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    #[default]
    Any,
    Exactly(Term),
}

impl Slot {
    pub fn matches(&self, actual: &Term) -> bool {
        match self {
            Slot::Any => true,
            Slot::Exactly(expected) => expected == actual,
        }
    }

    fn matches_opt(&self, actual: Option<&Term>) -> bool {
        match (self, actual) {
            (Slot::Any, _) => true,
            (Slot::Exactly(expected), Some(actual)) => expected == actual,
            (Slot::Exactly(_), None) => false,
        }
    }
}

/// `(element, attribute, value, row id)` pattern. Start from [`Pattern::any`]
/// and pin positions with the builder methods:
///
/// ```
/// use metaquery_store::{Pattern, Row};
///
/// let p = Pattern::any().attribute("0").value("String");
/// assert!(p.matches(&Row::triple("2", "0", "String")));
/// assert!(!p.matches(&Row::triple("3", "0", "Reference")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    pub element: Slot,
    pub attribute: Slot,
    pub value: Slot,
    pub row_id: Slot,
}

impl Pattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn element(mut self, element: impl Into<Term>) -> Self {
        self.element = Slot::Exactly(element.into());
        self
    }

    pub fn attribute(mut self, attribute: impl Into<Term>) -> Self {
        self.attribute = Slot::Exactly(attribute.into());
        self
    }

    pub fn value(mut self, value: impl Into<Term>) -> Self {
        self.value = Slot::Exactly(value.into());
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.element.matches(&row.element)
            && self.attribute.matches(&row.attribute)
            && self.value.matches(&row.value)
            && self.row_id.matches_opt(row.row_id.as_ref())
    }
}
