use crate::completion::OutputSink;
use crate::error::SessionError;
use xmlpdf_types::{DocumentOptions, TextOptions};

/// The mutable builder state for one render.
///
/// A session is mutated by exactly one interpreter pass and finalized at most
/// once, after that pass returns. Finalizing hands the encoded output to the
/// sink; the caller observes it through the paired [`crate::Completion`].
pub trait DocumentSession: Send {
    fn add_page(&mut self) -> Result<(), SessionError>;

    fn set_font(&mut self, name: &str) -> Result<(), SessionError>;

    fn set_font_size(&mut self, size: f32) -> Result<(), SessionError>;

    fn set_fill_color(&mut self, value: &str) -> Result<(), SessionError>;

    fn draw_text(&mut self, text: &str, options: &TextOptions) -> Result<(), SessionError>;

    /// Stops accepting content and starts producing output into `sink`.
    ///
    /// Output may still be in flight when this returns.
    fn finalize(&mut self, sink: OutputSink) -> Result<(), SessionError>;

    /// Drops all state without producing output. Any output already in flight
    /// is stopped at the next chunk boundary.
    fn abandon(&mut self);
}

impl<S: DocumentSession + ?Sized> DocumentSession for Box<S> {
    fn add_page(&mut self) -> Result<(), SessionError> {
        (**self).add_page()
    }

    fn set_font(&mut self, name: &str) -> Result<(), SessionError> {
        (**self).set_font(name)
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), SessionError> {
        (**self).set_font_size(size)
    }

    fn set_fill_color(&mut self, value: &str) -> Result<(), SessionError> {
        (**self).set_fill_color(value)
    }

    fn draw_text(&mut self, text: &str, options: &TextOptions) -> Result<(), SessionError> {
        (**self).draw_text(text, options)
    }

    fn finalize(&mut self, sink: OutputSink) -> Result<(), SessionError> {
        (**self).finalize(sink)
    }

    fn abandon(&mut self) {
        (**self).abandon()
    }
}

/// Creates a fresh session per render.
pub trait SessionFactory: Send + Sync {
    type Session: DocumentSession;

    fn create(&self, options: &DocumentOptions) -> Result<Self::Session, SessionError>;
}
