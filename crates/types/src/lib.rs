pub mod color;
pub mod document;
pub mod font;
pub mod geometry;
pub mod text;

pub use color::Color;
pub use document::{DocumentInfo, DocumentOptions};
pub use font::StandardFont;
pub use geometry::{Orientation, PageSize, Size};
pub use text::{TextAlign, TextOptions};
