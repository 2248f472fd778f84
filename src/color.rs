//! Colour primitives shared by the resolver and the contrast checker.
//!
//! A [`Color`] wraps an 8-bit sRGB value and is always written as an
//! upper-case `#RRGGBB` string. Badge layers refer to colours through one of
//! four [`LayerSlot`]s; a [`SlotPalette`] holds one colour per slot.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Color
// ============================================================================

/// Error returned when a string is not a valid hex colour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex colour `{input}`")]
pub struct ColorParseError {
    /// The rejected input.
    pub input: String,
}

/// An opaque sRGB colour with 8-bit channels.
///
/// Parsing accepts `#RRGGBB` and the short `#RGB` form, with or without the
/// leading `#`. Display and serialization always produce `#RRGGBB`.
///
/// ```
/// use badgesmith::Color;
///
/// let teal: Color = "#14b8a6".parse().unwrap();
/// assert_eq!(teal.to_string(), "#14B8A6");
/// assert_eq!(teal.channels(), (0x14, 0xB8, 0xA6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Creates a colour from its red, green and blue channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the `(red, green, blue)` channels.
    pub fn channels(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Returns the colour as a palette sRGB value.
    pub fn as_srgb(&self) -> Srgb<u8> {
        Srgb::new(self.red, self.green, self.blue)
    }

    /// Shifts every channel by `delta`, saturating at 0 and 255.
    pub fn shifted(&self, delta: i16) -> Self {
        let shift = |c: u8| (i16::from(c) + delta).clamp(0, 255) as u8;
        Self::from_rgb(shift(self.red), shift(self.green), shift(self.blue))
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Self {
        Self::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError { input: s.to_owned() });
        }
        Srgb::<u8>::from_str(digits)
            .map(Self::from)
            .map_err(|_| ColorParseError { input: s.to_owned() })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.channels();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_owned()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(generator)
    }
}

// ============================================================================
// Layer Slots
// ============================================================================

/// The four colourable slots of a badge icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum LayerSlot {
    Base,
    Background,
    Foreground,
    Symbol,
}

impl LayerSlot {
    /// All slots, in back-to-front paint order.
    pub const ALL: [Self; 4] = [Self::Background, Self::Base, Self::Foreground, Self::Symbol];

    /// The wire name of the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Symbol => "symbol",
        }
    }
}

impl fmt::Display for LayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SlotPalette
// ============================================================================

/// One colour per [`LayerSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SlotPalette {
    pub base: Color,
    pub background: Color,
    pub foreground: Color,
    pub symbol: Color,
}

impl SlotPalette {
    /// Built-in fallback colours used when neither an override nor a theme
    /// supplies a slot: violet, teal, amber and white.
    pub const FALLBACK: Self = Self {
        base: Color::from_rgb(0x7C, 0x3A, 0xED),
        background: Color::from_rgb(0x14, 0xB8, 0xA6),
        foreground: Color::from_rgb(0xF5, 0x9E, 0x0B),
        symbol: Color::WHITE,
    };

    /// Returns the colour assigned to `slot`.
    pub fn get(&self, slot: LayerSlot) -> Color {
        match slot {
            LayerSlot::Base => self.base,
            LayerSlot::Background => self.background,
            LayerSlot::Foreground => self.foreground,
            LayerSlot::Symbol => self.symbol,
        }
    }
}

impl Default for SlotPalette {
    fn default() -> Self {
        Self::FALLBACK
    }
}

// ============================================================================
// Tests
// ============================================================================
