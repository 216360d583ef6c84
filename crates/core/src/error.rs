use thiserror::Error;
use xmlpdf_render_core::SessionError;

/// Conditions that stop an interpreter pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpretError {
    #[error("Invalid value '{value}' for attribute '{attribute}' on <{tag}>: {reason}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl InterpretError {
    pub fn invalid_attribute(tag: &str, attribute: &str, value: &str, reason: impl Into<String>) -> Self {
        InterpretError::InvalidAttribute {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
