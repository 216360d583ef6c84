use thiserror::Error;

/// Conditions raised by a document session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Font '{0}' is not available")]
    FontNotFound(String),
    #[error("Unsupported color '{value}': {message}")]
    UnsupportedColor { value: String, message: String },
    #[error("Unsupported text alignment '{0}'")]
    UnsupportedAlignment(String),
    #[error("Invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: f32 },
    #[error("Cannot draw before a page has been added")]
    NoActivePage,
    #[error("Session has been finalized and accepts no more content")]
    Finalized,
    #[error("Session was already finalized")]
    AlreadyFinalized,
    #[error("Finalizing requires a running tokio runtime")]
    NoRuntime,
    #[error("Output sink error: {0}")]
    Output(String),
    #[error("PDF generation error: {0}")]
    Pdf(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Output(err.to_string())
    }
}
