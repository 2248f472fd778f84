//! Effective colour resolution for badge layer slots.

use serde::{Deserialize, Serialize};

use crate::color::{Color, LayerSlot, SlotPalette};
use crate::icon::{IconConfig, IconMode};
use crate::layer::LayerStackItem;
use crate::theme::{Theme, ThemeCatalog};

/// Resolves the colour painted in each layer slot.
///
/// The first match wins:
///
/// 1. custom mode and the item carries a colour override;
/// 2. custom mode and `custom_colors` has an entry for the slot;
/// 3. a theme is supplied;
/// 4. the resolver's fallback palette.
///
/// The fallback applies in theme mode too when no theme is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorResolver {
    fallback: SlotPalette,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new(SlotPalette::FALLBACK)
    }
}

impl ColorResolver {
    /// Creates a resolver with a custom fallback palette.
    pub fn new(fallback: SlotPalette) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &SlotPalette {
        &self.fallback
    }

    /// Resolves a single slot.
    pub fn effective_color(
        &self,
        slot: LayerSlot,
        config: &IconConfig,
        theme: Option<&Theme>,
        item: Option<&LayerStackItem>,
    ) -> Color {
        if config.mode == IconMode::Custom {
            if let Some(color) = item.and_then(|item| item.color) {
                return color;
            }
            if let Some(color) = config.custom_colors.get(&slot) {
                return *color;
            }
        }
        match theme {
            Some(theme) => theme.colors.get(slot),
            None => self.fallback.get(slot),
        }
    }

    /// Resolves all four slots, using each slot's own item as the override
    /// source.
    pub fn resolve_all(&self, config: &IconConfig, theme: Option<&Theme>) -> ResolvedColors {
        let resolve = |slot| self.effective_color(slot, config, theme, config.item_for(slot));
        ResolvedColors {
            base: resolve(LayerSlot::Base),
            background: resolve(LayerSlot::Background),
            foreground: resolve(LayerSlot::Foreground),
            symbol: resolve(LayerSlot::Symbol),
        }
    }

    /// Resolves all slots, looking the config's theme up in `catalog`.
    ///
    /// The theme only takes part in theme mode; an unknown theme id behaves
    /// like no theme.
    pub fn resolve_with_catalog(&self, config: &IconConfig, catalog: &ThemeCatalog) -> ResolvedColors {
        let theme = match config.mode {
            IconMode::Theme => config.theme_id.as_deref().and_then(|id| catalog.get(id)),
            IconMode::Custom => None,
        };
        if config.mode == IconMode::Theme && theme.is_none() {
            if let Some(id) = config.theme_id.as_deref() {
                tracing::debug!(theme_id = id, "unknown theme, using fallback colours");
            }
        }
        self.resolve_all(config, theme)
    }
}

/// Resolves one slot with the built-in fallback palette.
pub fn effective_color(
    slot: LayerSlot,
    config: &IconConfig,
    theme: Option<&Theme>,
    item: Option<&LayerStackItem>,
) -> Color {
    ColorResolver::default().effective_color(slot, config, theme, item)
}

/// The resolved colour of every slot of one badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColors {
    pub base: Color,
    pub background: Color,
    pub foreground: Color,
    pub symbol: Color,
}

impl ResolvedColors {
    pub fn get(&self, slot: LayerSlot) -> Color {
        match slot {
            LayerSlot::Base => self.base,
            LayerSlot::Background => self.background,
            LayerSlot::Foreground => self.foreground,
            LayerSlot::Symbol => self.symbol,
        }
    }
}

impl From<SlotPalette> for ResolvedColors {
    fn from(palette: SlotPalette) -> Self {
        Self {
            base: palette.base,
            background: palette.background,
            foreground: palette.foreground,
            symbol: palette.symbol,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerStack;

    const RED: Color = Color::from_rgb(255, 0, 0);
    const GREEN: Color = Color::from_rgb(0, 255, 0);

    fn ocean() -> &'static Theme {
        ThemeCatalog::builtin().get("ocean").unwrap()
    }

    fn custom() -> IconConfig {
        IconConfig {
            mode: IconMode::Custom,
            ..IconConfig::default()
        }
    }

    #[test]
    fn item_override_wins_in_custom_mode() {
        let config = custom().with_custom_color(LayerSlot::Base, GREEN);
        let item = LayerStackItem::new("circle").with_color(RED);
        let color = effective_color(LayerSlot::Base, &config, Some(ocean()), Some(&item));
        assert_eq!(color, RED);
    }

    #[test]
    fn slot_override_beats_theme_in_custom_mode() {
        let config = custom().with_custom_color(LayerSlot::Symbol, GREEN);
        let color = effective_color(LayerSlot::Symbol, &config, Some(ocean()), None);
        assert_eq!(color, GREEN);
    }

    #[test]
    fn overrides_are_ignored_in_theme_mode() {
        let mut config = IconConfig::default().with_theme("ocean");
        config.custom_colors.insert(LayerSlot::Base, GREEN);
        let item = LayerStackItem::new("circle").with_color(RED);

        let color = effective_color(LayerSlot::Base, &config, Some(ocean()), Some(&item));
        assert_eq!(color, ocean().colors.base);
    }

    #[test]
    fn theme_used_when_custom_has_no_override() {
        let color = effective_color(LayerSlot::Foreground, &custom(), Some(ocean()), None);
        assert_eq!(color, ocean().colors.foreground);
    }

    #[test]
    fn fallback_when_nothing_applies() {
        let config = IconConfig::default();
        for slot in LayerSlot::ALL {
            let color = effective_color(slot, &config, None, None);
            assert_eq!(color, SlotPalette::FALLBACK.get(slot));
        }
    }

    #[test]
    fn custom_fallback_palette() {
        let palette = SlotPalette {
            base: RED,
            ..SlotPalette::FALLBACK
        };
        let resolver = ColorResolver::new(palette);
        assert_eq!(
            resolver.effective_color(LayerSlot::Base, &IconConfig::default(), None, None),
            RED
        );
    }

    #[test]
    fn resolve_all_uses_each_slot_item() {
        let config = IconConfig {
            mode: IconMode::Custom,
            base: Some(LayerStackItem::new("circle").with_color(RED)),
            backgrounds: LayerStack::new()
                .with_item(LayerStackItem::new("rays").with_color(GREEN))
                .with_added("dots"),
            ..IconConfig::default()
        };
        let colors = ColorResolver::default().resolve_all(&config, None);
        assert_eq!(colors.base, RED);
        assert_eq!(colors.background, GREEN);
        assert_eq!(colors.foreground, SlotPalette::FALLBACK.foreground);
        assert_eq!(colors.symbol, Color::WHITE);
    }

    #[test]
    fn stacked_slot_uses_lowest_order_item_from_json() {
        let config: IconConfig = serde_json::from_value(serde_json::json!({
            "mode": "custom",
            "backgrounds": [
                { "id": "top", "color": "#FF0000", "order": 1 },
                { "id": "bottom", "color": "#00FF00", "order": 0 }
            ]
        }))
        .unwrap();

        assert!(config.backgrounds.is_contiguous());
        let colors = ColorResolver::default().resolve_all(&config, None);
        assert_eq!(colors.background, GREEN);
    }

    #[test]
    fn catalog_lookup_and_unknown_theme() {
        let resolver = ColorResolver::default();
        let catalog = ThemeCatalog::builtin();

        let known = resolver.resolve_with_catalog(&IconConfig::default().with_theme("ocean"), &catalog);
        assert_eq!(known, ResolvedColors::from(ocean().colors));

        let unknown = resolver.resolve_with_catalog(&IconConfig::default().with_theme("nope"), &catalog);
        assert_eq!(unknown, ResolvedColors::from(SlotPalette::FALLBACK));
    }
}
