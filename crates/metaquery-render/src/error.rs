use thiserror::Error;

/// Metadata that cannot be rendered as declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("attribute {attribute} is declared as a reference but holds {value}, which cannot be an element id")]
    NonScalarReference { attribute: String, value: String },
}
