//! The normalized tree a markup document is parsed into.
//!
//! An [`Element`] carries its text payload and attributes separately from its
//! children. Children are kept as an ordered list of [`Field`]s, each holding
//! either a single element or a run of same-named elements, so consumers
//! handle both shapes explicitly.

mod element;
mod error;
mod parser;

pub use element::{
    ATTRIBUTES_KEY, Attributes, Child, Children, Element, Field, SiblingOrder, TEXT_KEY,
};
pub use error::{Location, MarkupError};
pub use parser::{ParseOptions, parse_document};
