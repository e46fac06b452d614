//! Pixel samples and packed colour literals.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{ReflexError, Result};

/// One RGBA pixel read from the decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Sample {
    /// Create a new sample from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque sample from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The RGB part of the sample, alpha discarded.
    pub fn rgb_triple(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Packed colour literal for this sample. Alpha is always forced opaque.
    pub fn key(self) -> ColorKey {
        ColorKey::from_rgb(self.r, self.g, self.b)
    }
}

/// An opaque RGB triple, used for transparent-colour lists and dedup grouping.
///
/// Deserialises from either `[r, g, b]` or a hex string such as `"#ff0080"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RgbRepr", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex colour string (`#RGB` or `#RRGGBB`, hash optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        let parsed: Srgb<u8> = hex.parse().map_err(|e| ReflexError::Parse {
            message: format!("Invalid hex colour '{}': {}", s, e),
            help: Some("Use #RGB or #RRGGBB format, or an [r, g, b] list".to_string()),
        })?;

        Ok(Self::new(parsed.red, parsed.green, parsed.blue))
    }
}

impl FromStr for Rgb {
    type Err = ReflexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Triple([u8; 3]),
    Hex(String),
}

impl TryFrom<RgbRepr> for Rgb {
    type Error = String;

    fn try_from(repr: RgbRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            RgbRepr::Triple([r, g, b]) => Ok(Rgb::new(r, g, b)),
            RgbRepr::Hex(s) => Rgb::from_hex(&s).map_err(|e| e.to_string()),
        }
    }
}

/// Packed `0xAARRGGBB` colour as written into map records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(pub u32);

impl ColorKey {
    /// Fully transparent literal used by clip brushes.
    pub const CLEAR: Self = Self(0);

    /// Pack RGB with alpha forced to `0xFF`.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Lowercase `rrggbb` digits without the alpha byte.
    pub fn rgb_hex(self) -> String {
        format!("{:06x}", self.0 & 0x00FF_FFFF)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
