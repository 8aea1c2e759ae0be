//! Meta Query fact store
//!
//! Metadata is represented as a flat relation of fact rows:
//!
//! ```text
//! triple:  [element, attribute, value]
//! quad:    [element, attribute, value, row id]
//! ```
//!
//! The store keeps every loaded row in memory (duplicates included, insertion
//! order preserved) and answers pattern-match queries over it. There is no
//! index: every query is a linear scan, which is fine for the small, static
//! metadata files this tool is pointed at.
//!
//! ## Self-describing schema
//!
//! The relation describes its own schema. Construction is two-phase:
//!
//! 1. the raw rows are taken as-is, and
//! 2. a fixed sequence of bootstrap queries resolves the *well-known* elements
//!    (the identifier attribute, `value-type`, `String`, `Reference`) into a
//!    [`WellKnown`] value.
//!
//! Rendering code takes [`WellKnown`] as input rather than re-deriving it.
//! Anything that cannot be resolved is simply absent.

pub mod conventions;
pub mod pattern;
pub mod row;
pub mod store;
pub mod term;

pub use conventions::{Conventions, IdentifierSource, WellKnown};
pub use pattern::{Pattern, Slot};
pub use row::{AttributeEntry, Row, RowShape};
pub use store::FactStore;
pub use term::Term;
