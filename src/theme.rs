//! Built-in badge themes.
//!
//! Themes are fixed four-colour palettes identified by a stable id. The
//! catalogue is compiled into the crate and never changes at runtime.

use serde::Serialize;

use crate::color::{Color, SlotPalette};

/// A named four-colour palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Stable identifier referenced by `IconConfig::theme_id`.
    pub id: &'static str,
    /// Human readable label.
    pub name: &'static str,
    /// Colour for each layer slot.
    pub colors: SlotPalette,
}

const fn theme(id: &'static str, name: &'static str, colors: [u32; 4]) -> Theme {
    Theme {
        id,
        name,
        colors: SlotPalette {
            base: hex(colors[0]),
            background: hex(colors[1]),
            foreground: hex(colors[2]),
            symbol: hex(colors[3]),
        },
    }
}

const fn hex(rgb: u32) -> Color {
    Color::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

static BUILTIN_THEMES: [Theme; 6] = [
    theme("violet", "Violet", [0x7C3AED, 0x14B8A6, 0xF59E0B, 0xFFFFFF]),
    theme("ocean", "Ocean", [0x0369A1, 0x0EA5E9, 0x67E8F9, 0xFFFFFF]),
    theme("sunset", "Sunset", [0xEA580C, 0xFDE68A, 0xDC2626, 0xFFFBEB]),
    theme("forest", "Forest", [0x166534, 0xBBF7D0, 0x84CC16, 0xF0FDF4]),
    theme("gold", "Gold", [0xFACC15, 0x78350F, 0xFEF3C7, 0x422006]),
    theme("mono", "Monochrome", [0x1F2937, 0xE5E7EB, 0x9CA3AF, 0xFFFFFF]),
];

/// The fixed catalogue of themes shipped with the engine.
#[derive(Debug, Clone, Copy)]
pub struct ThemeCatalog {
    themes: &'static [Theme],
}

impl ThemeCatalog {
    /// Returns the built-in catalogue.
    pub fn builtin() -> Self {
        Self {
            themes: &BUILTIN_THEMES,
        }
    }

    /// Looks up a theme by id.
    pub fn get(&self, id: &str) -> Option<&'static Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    /// Returns an iterator over all themes in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Theme> + use<> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
