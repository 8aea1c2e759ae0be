//! Fact rows and the store-wide row shape.

use crate::term::Term;
use std::fmt;

/// Arity of every row in a store. Chosen once per store, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowShape {
    /// `[element, attribute, value]`
    #[default]
    Triple,
    /// `[element, attribute, value, row id]`
    Quad,
}

impl RowShape {
    pub const fn arity(self) -> usize {
        match self {
            RowShape::Triple => 3,
            RowShape::Quad => 4,
        }
    }

    pub const fn has_row_ids(self) -> bool {
        matches!(self, RowShape::Quad)
    }
}

impl fmt::Display for RowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowShape::Triple => f.write_str("triple"),
            RowShape::Quad => f.write_str("quad"),
        }
    }
}

/// One fact. `row_id` is present exactly when the row was built for a quad store.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub element: Term,
    pub attribute: Term,
    pub value: Term,
    pub row_id: Option<Term>,
}

impl Row {
    pub fn triple(
        element: impl Into<Term>,
        attribute: impl Into<Term>,
        value: impl Into<Term>,
    ) -> Self {
        Self {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
            row_id: None,
        }
    }

    pub fn quad(
        element: impl Into<Term>,
        attribute: impl Into<Term>,
        value: impl Into<Term>,
        row_id: impl Into<Term>,
    ) -> Self {
        Self {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
            row_id: Some(row_id.into()),
        }
    }

    /// Build a row from decoded positions, or `None` when the count does not
    /// match the shape's arity.
    pub fn from_terms(shape: RowShape, terms: Vec<Term>) -> Option<Self> {
        if terms.len() != shape.arity() {
            return None;
        }
        let mut it = terms.into_iter();
        let element = it.next()?;
        let attribute = it.next()?;
        let value = it.next()?;
        let row_id = match shape {
            RowShape::Triple => None,
            RowShape::Quad => Some(it.next()?),
        };
        Some(Self {
            element,
            attribute,
            value,
            row_id,
        })
    }

    pub fn shape(&self) -> RowShape {
        if self.row_id.is_some() {
            RowShape::Quad
        } else {
            RowShape::Triple
        }
    }
}

/// `(attribute, value)` projection of a row, with the row id carried along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeEntry<'a> {
    pub attribute: &'a Term,
    pub value: &'a Term,
    pub row_id: Option<&'a Term>,
}

impl<'a> From<&'a Row> for AttributeEntry<'a> {
    fn from(row: &'a Row) -> Self {
        Self {
            attribute: &row.attribute,
            value: &row.value,
            row_id: row.row_id.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(xs: &[&str]) -> Vec<Term> {
        xs.iter().map(|x| Term::from(*x)).collect()
    }

    #[test]
    fn from_terms_respects_arity() {
        assert_eq!(
            Row::from_terms(RowShape::Triple, terms(&["1", "0", "name"])),
            Some(Row::triple("1", "0", "name"))
        );
        assert_eq!(
            Row::from_terms(RowShape::Quad, terms(&["1", "0", "name", "7"])),
            Some(Row::quad("1", "0", "name", "7"))
        );
        assert_eq!(Row::from_terms(RowShape::Triple, terms(&["1", "0", "name", "7"])), None);
        assert_eq!(Row::from_terms(RowShape::Quad, terms(&["1", "0", "name"])), None);
        assert_eq!(Row::from_terms(RowShape::Triple, Vec::new()), None);
    }

    #[test]
    fn shape_follows_row_id() {
        assert_eq!(Row::triple("1", "2", "3").shape(), RowShape::Triple);
        assert_eq!(Row::quad("1", "2", "3", "4").shape(), RowShape::Quad);
        assert_eq!(RowShape::Quad.arity(), 4);
        assert!(!RowShape::Triple.has_row_ids());
    }
}
