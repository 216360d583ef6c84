//! # xmlpdf
//!
//! Renders declarative XML markup into PDF documents.
//!
//! ```no_run
//! let pdf = xmlpdf::render(r#"<document><page/><text align="center">Title</text></document>"#)?;
//! # Ok::<(), xmlpdf::RenderError>(())
//! ```
//!
//! The root element is `document`; its attributes configure the page size,
//! margins, default font and document information. Every child element is
//! dispatched by name to a registered handler. Elements without a handler
//! are plain containers. Custom vocabularies are added through
//! [`RendererBuilder::with_handler`].

mod error;
pub mod pipeline;

pub use error::RenderError;
pub use pipeline::{RenderConfig, Renderer, RendererBuilder};

pub use xmlpdf_core::{
    HandlerRegistry, HandlerRegistryBuilder, InterpretError, TagData, TagHandler, handlers, testing,
};
pub use xmlpdf_markup::{Element, MarkupError, ParseOptions, SiblingOrder};
pub use xmlpdf_render_core::{
    Completion, CompletionError, DocumentSession, OutputSink, SessionError, SessionFactory,
};
pub use xmlpdf_render_lopdf::{LopdfSession, LopdfSessionFactory};
pub use xmlpdf_types::{Color, DocumentOptions, PageSize, StandardFont, TextAlign, TextOptions};

use std::path::Path;

/// Renders `markup` with the built-in handlers and the lopdf session.
///
/// Blocks the calling thread. Inside an async runtime this returns
/// [`RenderError::Config`]; use [`Renderer::render`] there.
pub fn render(markup: &str) -> Result<Vec<u8>, RenderError> {
    Renderer::default().render_blocking(markup)
}

/// Like [`render`], then writes the result to `path`.
pub fn render_to_file(markup: &str, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let bytes = render(markup)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
