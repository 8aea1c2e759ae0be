//! The fact store: rows + resolved well-known elements.

use crate::conventions::{Conventions, WellKnown};
use crate::pattern::Pattern;
use crate::row::{AttributeEntry, Row, RowShape};
use crate::term::Term;
use std::collections::HashSet;
use tracing::debug;

/// Immutable in-memory fact store.
///
/// All queries are total: absence is an empty result, never an error.
#[derive(Debug, Clone)]
pub struct FactStore {
    shape: RowShape,
    rows: Vec<Row>,
    well_known: WellKnown,
}

impl FactStore {
    /// Build a store with the default conventions for `shape`.
    pub fn new(shape: RowShape, rows: Vec<Row>) -> Self {
        Self::with_conventions(shape, rows, &Conventions::for_shape(shape))
    }

    /// Two-phase construction: take the rows, then run the bootstrap queries.
    ///
    /// Rows whose shape differs from `shape` are dropped; duplicates are kept.
    pub fn with_conventions(shape: RowShape, rows: Vec<Row>, conventions: &Conventions) -> Self {
        let total = rows.len();
        let rows: Vec<Row> = rows.into_iter().filter(|r| r.shape() == shape).collect();
        if rows.len() != total {
            debug!(
                dropped = total - rows.len(),
                %shape,
                "dropped rows that do not match the store shape"
            );
        }

        let mut store = Self {
            shape,
            rows,
            well_known: WellKnown::default(),
        };
        store.well_known = WellKnown::resolve(&store, conventions);
        debug!(rows = store.rows.len(), %shape, "fact store ready");
        store
    }

    pub fn empty(shape: RowShape) -> Self {
        Self::new(shape, Vec::new())
    }

    pub fn shape(&self) -> RowShape {
        self.shape
    }

    pub fn well_known(&self) -> &WellKnown {
        &self.well_known
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row matching `pattern`, in insertion order.
    pub fn lookup(&self, pattern: &Pattern) -> Vec<&Row> {
        self.rows.iter().filter(|row| pattern.matches(row)).collect()
    }

    /// Values of `(element, attribute, *)` rows.
    pub fn attribute_value(&self, element: &Term, attribute: &Term) -> Vec<&Term> {
        self.lookup(
            &Pattern::any()
                .element(element.clone())
                .attribute(attribute.clone()),
        )
        .into_iter()
        .map(|row| &row.value)
        .collect()
    }

    /// All `(attribute, value)` pairs of an element, in row order.
    pub fn attributes_of(&self, element: &Term) -> Vec<AttributeEntry<'_>> {
        self.lookup(&Pattern::any().element(element.clone()))
            .into_iter()
            .map(AttributeEntry::from)
            .collect()
    }

    /// Every identifier string attached to `element` (zero or more).
    pub fn identifiers_of(&self, element: &Term) -> Vec<&Term> {
        match &self.well_known.identifier {
            Some(id) => self.attribute_value(element, id),
            None => Vec::new(),
        }
    }

    /// Elements carrying `identifier` through the identifier attribute.
    pub fn elements_with_identifier(&self, identifier: &str) -> Vec<&Term> {
        match &self.well_known.identifier {
            Some(id) => self.elements_identified_by(id, identifier),
            None => Vec::new(),
        }
    }

    /// Distinct values of the element column, in first-appearance order.
    pub fn all_elements(&self) -> Vec<&Term> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| &row.element)
            .filter(|element| seen.insert(element.key()))
            .collect()
    }
}
