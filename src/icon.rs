//! Badge icon composition.
//!
//! [`IconConfig`] is the canonical description of a badge icon. Inbound data
//! may be partial or use the older single-value `layers` shorthand; both are
//! captured by [`PartialIconConfig`] and turned into the canonical shape by
//! [`normalize`]. Deserializing an `IconConfig` always goes through
//! normalization, so code holding an `IconConfig` never has to check for the
//! legacy shape again.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::{Color, LayerSlot};
use crate::layer::{LayerStack, LayerStackItem};

// ============================================================================
// Enums
// ============================================================================

/// How layer colours are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum IconMode {
    /// Colours come from the selected theme.
    #[default]
    Theme,
    /// Colours come from per-item and per-slot overrides.
    Custom,
}

/// Rendering size hint, carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum IconSize {
    Sm,
    Md,
    #[default]
    Lg,
}

// ============================================================================
// Legacy shape
// ============================================================================

/// The older single-value layer shorthand: one bare asset id per slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LegacyLayers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl LegacyLayers {
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.background.is_none()
            && self.foreground.is_none()
            && self.symbol.is_none()
    }
}

// ============================================================================
// PartialIconConfig
// ============================================================================

/// An icon description as it may arrive from storage or an older client.
///
/// Every field is optional. The legacy shorthand is read from `layers`
/// (or `legacyLayers`).
///
/// `base` and `symbol` tell an absent key (`None`) from an explicit `null`
/// (`Some(None)`). Only an absent key lets the legacy shorthand fill the slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PartialIconConfig {
    #[serde(default)]
    pub mode: Option<IconMode>,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub size: Option<IconSize>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<LayerStackItem>"))]
    pub base: Option<Option<LayerStackItem>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<LayerStackItem>"))]
    pub symbol: Option<Option<LayerStackItem>>,
    #[serde(default)]
    pub backgrounds: Option<LayerStack>,
    #[serde(default)]
    pub foregrounds: Option<LayerStack>,
    #[serde(default)]
    pub custom_colors: Option<BTreeMap<LayerSlot, Color>>,
    #[serde(default, rename = "layers", alias = "legacyLayers")]
    pub legacy_layers: Option<LegacyLayers>,
}

/// Maps a key that is present, `null` included, to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PartialIconConfig {
    /// A partial config made only of the legacy shorthand.
    pub fn from_legacy(layers: LegacyLayers) -> Self {
        Self {
            legacy_layers: Some(layers),
            ..Self::default()
        }
    }
}

// ============================================================================
// IconConfig
// ============================================================================

/// The canonical icon composition of a badge.
///
/// `mode`, `size`, `backgrounds` and `foregrounds` are always present.
/// `legacy_layers` is whatever the original input carried and is written back
/// out under `layers` for older readers; it is never consulted once the
/// config has been normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", from = "PartialIconConfig")]
pub struct IconConfig {
    pub mode: IconMode,
    pub theme_id: Option<String>,
    pub size: IconSize,
    pub base: Option<LayerStackItem>,
    pub symbol: Option<LayerStackItem>,
    pub backgrounds: LayerStack,
    pub foregrounds: LayerStack,
    pub custom_colors: BTreeMap<LayerSlot, Color>,
    #[serde(rename = "layers", skip_serializing_if = "Option::is_none")]
    pub legacy_layers: Option<LegacyLayers>,
}

impl Default for IconConfig {
    fn default() -> Self {
        normalize(PartialIconConfig::default())
    }
}

impl From<PartialIconConfig> for IconConfig {
    fn from(partial: PartialIconConfig) -> Self {
        normalize(partial)
    }
}

impl From<IconConfig> for PartialIconConfig {
    fn from(config: IconConfig) -> Self {
        Self {
            mode: Some(config.mode),
            theme_id: config.theme_id,
            size: Some(config.size),
            base: Some(config.base),
            symbol: Some(config.symbol),
            backgrounds: Some(config.backgrounds),
            foregrounds: Some(config.foregrounds),
            custom_colors: Some(config.custom_colors),
            legacy_layers: config.legacy_layers,
        }
    }
}

impl IconConfig {
    /// Returns true if a base or a symbol is set.
    pub fn has_anchor(&self) -> bool {
        self.base.is_some() || self.symbol.is_some()
    }

    /// The item whose colour override applies to `slot`.
    ///
    /// Stacked slots use their first (lowest order) item.
    pub fn item_for(&self, slot: LayerSlot) -> Option<&LayerStackItem> {
        match slot {
            LayerSlot::Base => self.base.as_ref(),
            LayerSlot::Symbol => self.symbol.as_ref(),
            LayerSlot::Background => self.backgrounds.first(),
            LayerSlot::Foreground => self.foregrounds.first(),
        }
    }

    /// Switches to theme mode with the given theme.
    pub fn with_theme(mut self, theme_id: impl Into<String>) -> Self {
        self.mode = IconMode::Theme;
        self.theme_id = Some(theme_id.into());
        self
    }

    /// Switches to custom mode and sets a slot colour.
    pub fn with_custom_color(mut self, slot: LayerSlot, color: Color) -> Self {
        self.mode = IconMode::Custom;
        self.custom_colors.insert(slot, color);
        self
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Produces the canonical form of a possibly partial or legacy icon config.
///
/// Canonical fields win over the legacy shorthand, including a canonical
/// slot that is explicitly empty. Missing pieces take their
/// defaults: theme mode, large size, no theme, no custom colours and empty
/// stacks. The legacy shorthand itself is carried over verbatim.
///
/// The function is total and idempotent.
///
/// ```
/// use badgesmith::{normalize, IconMode, IconSize, LegacyLayers, PartialIconConfig};
///
/// let config = normalize(PartialIconConfig::from_legacy(LegacyLayers {
///     base: Some("circle".into()),
///     ..LegacyLayers::default()
/// }));
///
/// assert_eq!(config.base.unwrap().id, "circle");
/// assert!(config.backgrounds.is_empty());
/// assert_eq!(config.mode, IconMode::Theme);
/// assert_eq!(config.size, IconSize::Lg);
/// ```
pub fn normalize(partial: PartialIconConfig) -> IconConfig {
    let legacy = partial.legacy_layers.clone().unwrap_or_default();
    if partial.legacy_layers.as_ref().is_some_and(|l| !l.is_empty()) {
        tracing::debug!("normalizing icon config with legacy layers");
    }

    let single = |canonical: Option<Option<LayerStackItem>>, legacy: &Option<String>| {
        canonical.unwrap_or_else(|| legacy.as_ref().map(LayerStackItem::new))
    };
    let stacked = |canonical: Option<LayerStack>, legacy: &Option<String>| {
        canonical.unwrap_or_else(|| match legacy {
            Some(id) => LayerStack::new().with_added(id.as_str()),
            None => LayerStack::new(),
        })
    };

    IconConfig {
        mode: partial.mode.unwrap_or_default(),
        theme_id: partial.theme_id,
        size: partial.size.unwrap_or_default(),
        base: single(partial.base, &legacy.base),
        symbol: single(partial.symbol, &legacy.symbol),
        backgrounds: stacked(partial.backgrounds, &legacy.background),
        foregrounds: stacked(partial.foregrounds, &legacy.foreground),
        custom_colors: partial.custom_colors.unwrap_or_default(),
        legacy_layers: partial.legacy_layers,
    }
}

// ============================================================================
// Tests
// ============================================================================
