//! 8-bit RGB colors
//!
//! Theme descriptors carry their colors as CSS strings. `Rgb` is the parsed,
//! validated form used everywhere else in the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing or validating a color
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input is not a recognised CSS color notation
    #[error("invalid color format: {0:?}")]
    InvalidFormat(String),

    /// A channel value lies outside 0..=255
    #[error("color channel {channel} out of range: {value}")]
    ChannelOutOfRange { channel: &'static str, value: i64 },
}

/// An opaque 8-bit-per-channel RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Validate three untyped channel values
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        fn channel(name: &'static str, value: i64) -> Result<u8, ColorError> {
            u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange {
                channel: name,
                value,
            })
        }

        Ok(Self {
            r: channel("r", r)?,
            g: channel("g", g)?,
            b: channel("b", b)?,
        })
    }

    /// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)` (case-insensitive)
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let raw = input.trim().to_ascii_lowercase();

        if let Some(hex) = raw.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| ColorError::InvalidFormat(input.to_string()));
        }

        if let Some(body) = raw
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(ColorError::InvalidFormat(input.to_string()));
            };
            let number = |s: &str| {
                s.parse::<i64>()
                    .map_err(|_| ColorError::InvalidFormat(input.to_string()))
            };
            return Self::from_channels(number(*r)?, number(*g)?, number(*b)?);
        }

        Err(ColorError::InvalidFormat(input.to_string()))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(Self::from_hex),
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_hex)
            }
            _ => None,
        }
    }

    /// Move every channel toward 255 by `amount`, clamped
    pub const fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }

    /// Move every channel toward 0 by `amount`, clamped
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }

    /// Rec.601 luma in the 0.0..=255.0 range
    pub fn brightness(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Lowercase `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Rgb::parse("#1E66F5").unwrap(), Rgb::new(0x1E, 0x66, 0xF5));
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("  #101010 ").unwrap(), Rgb::new(16, 16, 16));
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(
            Rgb::parse("rgb(12, 34, 255)").unwrap(),
            Rgb::new(12, 34, 255)
        );
        assert_eq!(Rgb::parse("RGB(0,0,0)").unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "101010", "#12345", "#gggggg", "rgb(1, 2)", "rgb(a, b, c)", "blue"] {
            assert!(
                matches!(Rgb::parse(input), Err(ColorError::InvalidFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_channel_range_is_validated() {
        assert_eq!(
            Rgb::parse("rgb(256, 0, 0)"),
            Err(ColorError::ChannelOutOfRange {
                channel: "r",
                value: 256
            })
        );
        assert!(Rgb::from_channels(0, -1, 0).is_err());
        assert_eq!(Rgb::from_channels(1, 2, 3).unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_lighten_and_darken_clamp() {
        let c = Rgb::new(200, 100, 10);
        assert_eq!(c.lighten(100), Rgb::new(255, 200, 110));
        assert_eq!(c.darken(50), Rgb::new(150, 50, 0));
    }

    #[test]
    fn test_hex_round_trip_through_serde() {
        let c = Rgb::from_hex(0xF5F5F5);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#f5f5f5\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
