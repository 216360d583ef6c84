use serde::Serialize;
use std::fmt;

/// Horizontal alignment of a text run.
///
/// Values outside the known set are kept verbatim in `Other` so the session
/// receiving them decides whether to reject them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
    Other(String),
}

impl TextAlign {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => TextAlign::Left,
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            "justify" => TextAlign::Justify,
            _ => TextAlign::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
            TextAlign::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options for drawing text. Absent options fall back to the session's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextOptions {
    pub width: Option<f32>,
    pub align: Option<TextAlign>,
}
