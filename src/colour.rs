use serde::{de, Deserialize, Deserializer, Serialize};

/// A colour, expressed in RGB, CMYK, or grey colour spaces.
///
/// Serialised without a tag. A JSON style file can write `"#2563eb"`,
/// `{"r": 0.1, "g": 0.4, "b": 0.9}`, `{"c": .., "m": .., "y": .., "k": ..}` or `{"g": 0.5}`;
/// an object with missing or extra channels is an error.
#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string, as used by the web front-end's palette
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged, deny_unknown_fields)]
        enum ColourDef {
            Hex(String),
            Rgb { r: f32, g: f32, b: f32 },
            Cmyk { c: f32, m: f32, y: f32, k: f32 },
            Grey { g: f32 },
        }

        match ColourDef::deserialize(deserializer).map_err(|_| {
            de::Error::custom("expected a \"#rrggbb\" string or an object with r/g/b, c/m/y/k or g")
        })? {
            ColourDef::Hex(hex) => Colour::from_hex(&hex)
                .ok_or_else(|| de::Error::custom(format!("{hex:?} is not a #rrggbb colour"))),
            ColourDef::Rgb { r, g, b } => Ok(Colour::RGB { r, g, b }),
            ColourDef::Cmyk { c, m, y, k } => Ok(Colour::CMYK { c, m, y, k }),
            ColourDef::Grey { g } => Ok(Colour::Grey { g }),
        }
    }
}

/// Colours used by the default report style
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Body text
    pub const INK: Colour = Colour::RGB {
        r: 0.118,
        g: 0.161,
        b: 0.231,
    };
    /// Secondary text: labels, dates, footers
    pub const MUTED: Colour = Colour::RGB {
        r: 0.392,
        g: 0.455,
        b: 0.545,
    };
    /// Brand accent for section labels and emphasised rows
    pub const ACCENT: Colour = Colour::RGB {
        r: 0.145,
        g: 0.388,
        b: 0.922,
    };
    /// Background of key-value rows
    pub const PANEL: Colour = Colour::RGB {
        r: 0.945,
        g: 0.961,
        b: 0.976,
    };
    /// Background of emphasised key-value rows
    pub const PANEL_ACCENT: Colour = Colour::RGB {
        r: 0.859,
        g: 0.918,
        b: 0.996,
    };
    /// Rules and hairlines
    pub const RULE: Colour = Colour::RGB {
        r: 0.886,
        g: 0.910,
        b: 0.941,
    };
}
