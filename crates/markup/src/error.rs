use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl From<roxmltree::TextPos> for Location {
    fn from(pos: roxmltree::TextPos) -> Self {
        Location { line: pos.row as usize, col: pos.col as usize }
    }
}

/// The markup could not be turned into a tree.
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("XML parsing error at {location}: {source}")]
    Xml {
        source: roxmltree::Error,
        location: Location,
    },

    #[error("Expected root element <{expected}> but found <{found}> at {location}")]
    UnexpectedRoot {
        expected: String,
        found: String,
        location: Location,
    },
}

impl From<roxmltree::Error> for MarkupError {
    fn from(e: roxmltree::Error) -> Self {
        let location = e.pos().into();
        MarkupError::Xml { source: e, location }
    }
}
