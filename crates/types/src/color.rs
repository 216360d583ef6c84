use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    [
        ("black", (0, 0, 0)),
        ("white", (255, 255, 255)),
        ("red", (255, 0, 0)),
        ("lime", (0, 255, 0)),
        ("green", (0, 128, 0)),
        ("blue", (0, 0, 255)),
        ("yellow", (255, 255, 0)),
        ("cyan", (0, 255, 255)),
        ("aqua", (0, 255, 255)),
        ("magenta", (255, 0, 255)),
        ("fuchsia", (255, 0, 255)),
        ("silver", (192, 192, 192)),
        ("gray", (128, 128, 128)),
        ("grey", (128, 128, 128)),
        ("darkgray", (169, 169, 169)),
        ("darkgrey", (169, 169, 169)),
        ("lightgray", (211, 211, 211)),
        ("lightgrey", (211, 211, 211)),
        ("dimgray", (105, 105, 105)),
        ("maroon", (128, 0, 0)),
        ("darkred", (139, 0, 0)),
        ("olive", (128, 128, 0)),
        ("purple", (128, 0, 128)),
        ("teal", (0, 128, 128)),
        ("navy", (0, 0, 128)),
        ("darkblue", (0, 0, 139)),
        ("darkgreen", (0, 100, 0)),
        ("orange", (255, 165, 0)),
        ("darkorange", (255, 140, 0)),
        ("orangered", (255, 69, 0)),
        ("gold", (255, 215, 0)),
        ("pink", (255, 192, 203)),
        ("hotpink", (255, 105, 180)),
        ("crimson", (220, 20, 60)),
        ("brown", (165, 42, 42)),
        ("chocolate", (210, 105, 30)),
        ("tomato", (255, 99, 71)),
        ("coral", (255, 127, 80)),
        ("salmon", (250, 128, 114)),
        ("indigo", (75, 0, 130)),
        ("violet", (238, 130, 238)),
        ("orchid", (218, 112, 214)),
        ("lavender", (230, 230, 250)),
        ("beige", (245, 245, 220)),
        ("ivory", (255, 255, 240)),
        ("khaki", (240, 230, 140)),
        ("tan", (210, 180, 140)),
        ("steelblue", (70, 130, 180)),
        ("royalblue", (65, 105, 225)),
        ("skyblue", (135, 206, 235)),
        ("slategray", (112, 128, 144)),
        ("turquoise", (64, 224, 208)),
        ("seagreen", (46, 139, 87)),
        ("forestgreen", (34, 139, 34)),
    ]
    .into_iter()
    .map(|(name, (r, g, b))| (name, Color { r, g, b }))
    .collect()
});

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Parses `#RGB`, `#RRGGBB` or a CSS color name.
    pub fn parse(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::parse_hex(s);
        }
        NAMED_COLORS
            .get(s.to_ascii_lowercase().as_str())
            .cloned()
            .ok_or_else(|| format!("Unknown color name: {}", s))
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let hex = &s[1..];
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }

    /// Components scaled to the 0..=1 range used by PDF color operators.
    pub fn to_unit_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
