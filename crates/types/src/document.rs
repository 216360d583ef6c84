use crate::geometry::{Orientation, PageSize, Size};
use serde::Serialize;

/// Entries for the PDF document information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

impl DocumentInfo {
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// `(key, value)` pairs for every populated entry, in dictionary key order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Author", self.author.as_deref()),
            ("Creator", self.creator.as_deref()),
            ("Keywords", self.keywords.as_deref()),
            ("Producer", self.producer.as_deref()),
            ("Subject", self.subject.as_deref()),
            ("Title", self.title.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }
}

/// Construction options for a document session, resolved from the root element's attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentOptions {
    pub size: PageSize,
    pub orientation: Orientation,
    /// Margin applied to all four sides, in points.
    pub margin: f32,
    pub font: String,
    pub font_size: f32,
    pub info: DocumentInfo,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            orientation: Orientation::default(),
            margin: 72.0,
            font: "Helvetica".to_string(),
            font_size: 12.0,
            info: DocumentInfo {
                producer: Some("xmlpdf".to_string()),
                ..Default::default()
            },
        }
    }
}

impl DocumentOptions {
    pub fn page_dimensions(&self) -> Size {
        self.size.oriented(self.orientation)
    }
}
