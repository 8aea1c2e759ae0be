//! Rendering over a resolved fact store.
//!
//! - [`Renderer::name_of`]: `Foo(42)` from an element's first identifier
//! - [`Renderer::value_of`]: values typed by their attribute's declared
//!   value-type (reference, string, or opaque blob)
//! - [`Renderer::dump`]: one element with all of its attributes
//! - [`Renderer::annotate`]: an input line, decorated when it is a row

mod annotate;
mod dump;
mod error;
mod render;

pub use annotate::{AnnotateOptions, ANNOTATION_MARKER};
pub use error::RenderError;
pub use render::{Renderer, ValueKind};
