//! Hex color parsing and the RGB distance metric used for shade matching.

use serde::{Deserialize, Serialize};

/// Distance reported when either side of a comparison does not parse.
///
/// Far beyond the largest possible RGB distance (~441.7), so an unparseable
/// shade can never win a comparison or clear the match cutoff.
pub const UNPARSEABLE_DISTANCE: f32 = 1000.0;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `RRGGBB` hex string with at most one leading `#`.
    ///
    /// Case-insensitive, exactly six hex digits. Anything else (shorthand
    /// `#fff`, trailing characters, non-hex digits) yields `None`; catalog
    /// data is messy and must never panic the scorer.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Byte-wise slicing below requires ASCII.
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Distance between two hex strings; total over all inputs.
///
/// Returns [`UNPARSEABLE_DISTANCE`] when either side fails to parse.
pub fn hex_distance(a: &str, b: &str) -> f32 {
    match (Rgb::parse_hex(a), Rgb::parse_hex(b)) {
        (Some(a), Some(b)) => a.distance(b),
        _ => UNPARSEABLE_DISTANCE,
    }
}
