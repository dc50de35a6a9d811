//! Colors and discrete palettes for classified precipitation maps.
//!
//! Palettes are ordered lists of hex colors. Classified maps resample a
//! palette linearly over however many bins the classification produced.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA" (leading '#' optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();

        match s.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Lowercase "#rrggbb" (alpha omitted when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp_u8 = |a: u8, b: u8| -> u8 { ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8 };

        Color::new(
            lerp_u8(self.r, other.r),
            lerp_u8(self.g, other.g),
            lerp_u8(self.b, other.b),
            lerp_u8(self.a, other.a),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An ordered list of named colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<Color>,
}

impl Palette {
    /// Build a palette from hex strings, rejecting any that fail to parse.
    pub fn from_hex(name: impl Into<String>, hex: &[&str]) -> Option<Self> {
        let colors = hex.iter().map(|h| Color::from_hex(h)).collect::<Option<Vec<_>>>()?;
        Some(Self {
            name: name.into(),
            colors,
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at normalized position `t` in [0, 1], interpolating between
    /// neighbouring entries.
    pub fn sample(&self, t: f64) -> Color {
        match self.colors.len() {
            0 => Color::transparent(),
            1 => self.colors[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let low = pos.floor() as usize;
                let high = (low + 1).min(n - 1);
                self.colors[low].lerp(&self.colors[high], pos - low as f64)
            }
        }
    }

    /// Resample into exactly `count` discrete colors, first and last entries
    /// pinned to the palette ends.
    pub fn discretize(&self, count: usize) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            n => (0..n).map(|k| self.sample(k as f64 / (n - 1) as f64)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_hex("#9a3c3c").unwrap();
        assert_eq!(c, Color::rgb(0x9a, 0x3c, 0x3c));
        assert_eq!(c.to_hex(), "#9a3c3c");
        assert_eq!(Color::from_hex("FF000080").unwrap().a, 0x80);
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#FFF").is_none());
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_discretize_pins_ends() {
        let palette = Palette::from_hex("test", &["#000000", "#ffffff"]).unwrap();
        let colors = palette.discretize(3);
        assert_eq!(colors[0], Color::BLACK);
        assert_eq!(colors[1], Color::rgb(128, 128, 128));
        assert_eq!(colors[2], Color::WHITE);
    }

    #[test]
    fn test_discretize_identity_when_counts_match() {
        let palette = Palette::from_hex("test", &["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        assert_eq!(palette.discretize(3), palette.colors);
    }
}
