//! # xmlpdf-core
//!
//! Turns an attributed element tree into calls on a [`DocumentSession`].
//!
//! - **registry**: the immutable tag name to handler mapping
//! - **interpreter**: the depth-first walk that dispatches each element
//! - **handlers**: the built-in `page` and `text` handlers
//! - **attributes**: coercion of attribute strings into typed values
//! - **testing**: a recording session for asserting on dispatched calls
//!
//! The crate has no dependency on a concrete PDF backend; any
//! [`SessionFactory`] can be driven by the interpreter.

pub mod attributes;
pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod registry;
pub mod testing;

pub use attributes::document_options;
pub use error::InterpretError;
pub use interpreter::Interpreter;
pub use registry::{HandlerRegistry, HandlerRegistryBuilder, TagData, TagHandler};

pub use xmlpdf_markup as markup;
pub use xmlpdf_render_core::{DocumentSession, SessionError, SessionFactory};
pub use xmlpdf_types as types;
