use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!("expected 'portrait' or 'landscape', got '{}'", other)),
        }
    }
}

/// A page size in PDF points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum PageSize {
    A3,
    A4,
    A5,
    #[default]
    Letter,
    Legal,
    Tabloid,
    Executive,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Accepts a named size (case-insensitive) or `WIDTHxHEIGHT` in points.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let named = match s.to_ascii_uppercase().as_str() {
            "A3" => Some(PageSize::A3),
            "A4" => Some(PageSize::A4),
            "A5" => Some(PageSize::A5),
            "LETTER" => Some(PageSize::Letter),
            "LEGAL" => Some(PageSize::Legal),
            "TABLOID" => Some(PageSize::Tabloid),
            "EXECUTIVE" => Some(PageSize::Executive),
            _ => None,
        };
        if let Some(size) = named {
            return Ok(size);
        }

        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("unknown page size '{}'", s))?;
        let width = parse_dimension(w)?;
        let height = parse_dimension(h)?;
        Ok(PageSize::Custom { width, height })
    }

    pub fn dimensions_pt(&self) -> Size {
        match *self {
            PageSize::A3 => Size::new(841.89, 1190.55),
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::A5 => Size::new(419.53, 595.28),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Tabloid => Size::new(792.0, 1224.0),
            PageSize::Executive => Size::new(521.86, 756.0),
            PageSize::Custom { width, height } => Size::new(width, height),
        }
    }

    /// Dimensions with width and height swapped for landscape.
    pub fn oriented(&self, orientation: Orientation) -> Size {
        let size = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => Size::new(size.height, size.width),
        }
    }
}

fn parse_dimension(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid page dimension '{}'", s.trim()))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("page dimension must be positive, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_sizes_are_case_insensitive() {
        assert_eq!(PageSize::parse("a4").unwrap(), PageSize::A4);
        assert_eq!(PageSize::parse("Letter").unwrap(), PageSize::Letter);
    }

    #[test]
    fn custom_sizes_parse_in_points() {
        assert_eq!(
            PageSize::parse("300x400").unwrap(),
            PageSize::Custom { width: 300.0, height: 400.0 }
        );
        assert!(PageSize::parse("300x-4").is_err());
        assert!(PageSize::parse("B52").is_err());
    }

    #[test]
    fn default_page_is_portrait_letter() {
        assert_eq!(PageSize::default(), PageSize::Letter);
        assert_eq!(PageSize::default().oriented(Orientation::default()), Size::new(612.0, 792.0));
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let size = PageSize::Letter.oriented(Orientation::Landscape);
        assert_eq!(size, Size::new(792.0, 612.0));
    }
}
