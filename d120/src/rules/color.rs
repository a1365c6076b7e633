use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A 24-bit sRGB display color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }

    /// Linear blend towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::choice_parser::parse_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Color::from_hex(0x0a2030).to_string(), "#0a2030");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::from_hex(0xc9a84c)).unwrap();
        assert_eq!(json, "\"#c9a84c\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_hex(0xc9a84c));
        assert!(serde_json::from_str::<Color>("\"gold\"").is_err());
    }

    #[test]
    fn test_lerp() {
        let black = Color::rgb(0, 0, 0);
        assert_eq!(black.lerp(Color::WHITE, 0.0), black);
        assert_eq!(black.lerp(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(black.lerp(Color::WHITE, 0.5), Color::rgb(128, 128, 128));
        assert_eq!(black.lerp(Color::WHITE, 7.0), Color::WHITE);
    }
}
