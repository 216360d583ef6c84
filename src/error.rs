//! Defines the error type for every render operation.

use std::time::Duration;
use thiserror::Error;
use xmlpdf_core::InterpretError;
use xmlpdf_markup::MarkupError;
use xmlpdf_render_core::{CompletionError, SessionError};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Malformed markup: {0}")]
    MalformedMarkup(#[from] MarkupError),
    #[error(transparent)]
    Interpret(InterpretError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Output was not completed: {0}")]
    Completion(#[from] CompletionError),
    #[error("Output did not complete within {0:?}")]
    Timeout(Duration),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

// Session conditions raised through a handler surface as `Session`, so callers
// match one variant regardless of where the session rejected a value.
impl From<InterpretError> for RenderError {
    fn from(e: InterpretError) -> Self {
        match e {
            InterpretError::Session(inner) => RenderError::Session(inner),
            other => RenderError::Interpret(other),
        }
    }
}
