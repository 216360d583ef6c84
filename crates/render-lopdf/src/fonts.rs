//! Glyph metrics for the standard Type1 fonts.
//!
//! Widths are in thousandths of an em for the printable ASCII range. Bold and
//! oblique faces share the widths of their regular face.

use xmlpdf_types::StandardFont;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const TIMES_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.156;

/// Distance from the top of a line to its baseline, as a multiple of the font size.
pub const ASCENT_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
enum WidthTable {
    Proportional { widths: &'static [u16; 95], fallback: u16 },
    Fixed(u16),
}

#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    table: WidthTable,
}

impl FontMetrics {
    pub fn for_font(font: StandardFont) -> Self {
        let table = match font {
            StandardFont::Helvetica
            | StandardFont::HelveticaBold
            | StandardFont::HelveticaOblique
            | StandardFont::HelveticaBoldOblique => WidthTable::Proportional {
                widths: &HELVETICA_WIDTHS,
                fallback: 556,
            },
            StandardFont::TimesRoman
            | StandardFont::TimesBold
            | StandardFont::TimesItalic
            | StandardFont::TimesBoldItalic => WidthTable::Proportional {
                widths: &TIMES_WIDTHS,
                fallback: 500,
            },
            _ => WidthTable::Fixed(600),
        };
        Self { table }
    }

    fn char_width(&self, c: char) -> u16 {
        match self.table {
            WidthTable::Fixed(width) => width,
            WidthTable::Proportional { widths, fallback } => {
                let code = c as u32;
                if (32..=126).contains(&code) {
                    widths[(code - 32) as usize]
                } else {
                    fallback
                }
            }
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_monospaced() {
        let metrics = FontMetrics::for_font(StandardFont::Courier);
        assert_eq!(metrics.measure("iiii", 10.0), metrics.measure("WWWW", 10.0));
        assert!((metrics.measure("abc", 10.0) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn helvetica_widths_scale_with_size() {
        let metrics = FontMetrics::for_font(StandardFont::Helvetica);
        // H = 722, i = 222
        assert!((metrics.measure("Hi", 1000.0) - 944.0).abs() < 1e-3);
        assert!((metrics.measure("Hi", 12.0) - 11.328).abs() < 1e-3);
    }
}
