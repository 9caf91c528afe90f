//! Display colors.
//!
//! Colors are stored in the settings file as `#rrggbb` strings. Parsing also
//! accepts the short `#rgb` form and a handful of common color names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Named colors accepted in the settings file.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("orange", Color::rgb(0xFF, 0xA5, 0x00)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("tomato", Color::rgb(0xFF, 0x63, 0x47)),
];

/// Error returned for strings that are not a recognized color.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color '{0}' (expected #rrggbb, #rgb or a color name)")]
pub struct ColorParseError(pub String);

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as `[r, g, b]`.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ColorParseError(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
            return match hex.len() {
                6 => Ok(Color::rgb(
                    channel(0..2).map_err(|_| invalid())?,
                    channel(2..4).map_err(|_| invalid())?,
                    channel(4..6).map_err(|_| invalid())?,
                )),
                3 => {
                    let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                    Ok(Color::rgb(
                        short(0).map_err(|_| invalid())?,
                        short(1).map_err(|_| invalid())?,
                        short(2).map_err(|_| invalid())?,
                    ))
                }
                _ => Err(invalid()),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!("#4CAF50".parse::<Color>(), Ok(Color::rgb(0x4C, 0xAF, 0x50)));
        assert_eq!("#ff6347".parse::<Color>(), Ok(Color::rgb(0xFF, 0x63, 0x47)));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!("#fa0".parse::<Color>(), Ok(Color::rgb(0xFF, 0xAA, 0x00)));
    }

    #[test]
    fn test_parse_named_case_insensitive() {
        assert_eq!("White".parse::<Color>(), Ok(Color::rgb(255, 255, 255)));
        assert_eq!(" tomato ".parse::<Color>(), Ok(Color::rgb(0xFF, 0x63, 0x47)));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "#", "#12345", "#gggggg", "ff0000", "chartreuse-ish", "#ÿÿÿ"] {
            let err = input.parse::<Color>().unwrap_err();
            assert_eq!(err, ColorParseError(input.to_string()), "input: {input:?}");
        }
    }

    #[test]
    fn test_display_is_upper_hex() {
        assert_eq!(Color::rgb(0x0a, 0xbc, 0xde).to_string(), "#0ABCDE");
    }

    #[test]
    fn test_display_parses_back() {
        let color = Color::rgb(1, 2, 3);
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
    }

    #[test]
    fn test_array_conversion() {
        let color = Color::from([10, 20, 30]);
        assert_eq!(color.to_array(), [10, 20, 30]);
    }
}
