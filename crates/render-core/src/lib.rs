//! Core rendering abstractions for document generation.
//!
//! This crate provides the seams between the markup interpreter and a
//! document-building backend:
//! - `DocumentSession` and `SessionFactory` traits for the builder primitives
//! - `SessionError` for conditions raised by a backend
//! - the `completion` protocol that carries encoded output back to the caller

pub mod completion;
mod error;
mod traits;

pub use completion::{ChunkWriter, Completion, CompletionError, OutputEvent, OutputSink};
pub use error::SessionError;
pub use traits::{DocumentSession, SessionFactory};
