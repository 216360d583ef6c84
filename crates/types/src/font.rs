use serde::Serialize;
use std::fmt;

/// The fourteen Type1 fonts every PDF reader ships with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    pub const ALL: [StandardFont; 14] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    /// The PostScript name written as `BaseFont`.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Looks a font up by PostScript name. `Times` is accepted as an alias of `Times-Roman`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("Times") {
            return Some(StandardFont::TimesRoman);
        }
        Self::ALL
            .into_iter()
            .find(|font| font.postscript_name().eq_ignore_ascii_case(name))
    }

}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_postscript_names() {
        assert_eq!(StandardFont::from_name("Helvetica-Bold"), Some(StandardFont::HelveticaBold));
        assert_eq!(StandardFont::from_name("courier"), Some(StandardFont::Courier));
        assert_eq!(StandardFont::from_name("Times"), Some(StandardFont::TimesRoman));
        assert_eq!(StandardFont::from_name("Comic Sans"), None);
    }

    #[test]
    fn default_font_is_helvetica() {
        assert_eq!(StandardFont::default(), StandardFont::Helvetica);
    }

    #[test]
    fn names_round_trip_for_every_font() {
        for font in StandardFont::ALL {
            assert_eq!(StandardFont::from_name(font.postscript_name()), Some(font));
        }
    }
}
