//! Property-based tests for normalization, colour and history invariants.

#![allow(clippy::unwrap_used, reason = "Test-only assertions and helpers are permitted.")]

use badgesmith::{
    AchievementItem, Color, ColorResolver, ExportArgs, ExportCodec, HistoryManager, IconConfig,
    IconMode, LayerSlot, LayerStack, LayerStackItem, LegacyLayers, PartialIconConfig, Theme,
    ThemeCatalog, contrast_ratio, normalize,
};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::from_rgb(r, g, b))
}

fn asset_id() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn slot() -> impl Strategy<Value = LayerSlot> {
    prop::sample::select(LayerSlot::ALL.to_vec())
}

fn legacy_layers() -> impl Strategy<Value = LegacyLayers> {
    (
        prop::option::of(asset_id()),
        prop::option::of(asset_id()),
        prop::option::of(asset_id()),
        prop::option::of(asset_id()),
    )
        .prop_map(|(base, background, foreground, symbol)| LegacyLayers {
            base,
            background,
            foreground,
            symbol,
        })
}

fn stack() -> impl Strategy<Value = LayerStack> {
    prop::collection::vec(asset_id(), 0..5).prop_map(|ids| {
        ids.into_iter()
            .fold(LayerStack::new(), |stack, id| stack.with_added(id))
    })
}

/// Absent key, explicit null, or an item.
fn canonical_slot() -> impl Strategy<Value = Option<Option<LayerStackItem>>> {
    prop::option::of(prop::option::of(asset_id().prop_map(LayerStackItem::new)))
}

fn partial_config() -> impl Strategy<Value = PartialIconConfig> {
    (
        prop::option::of(legacy_layers()),
        canonical_slot(),
        canonical_slot(),
        prop::option::of(stack()),
        prop::option::of(prop::sample::select(vec![IconMode::Theme, IconMode::Custom])),
        prop::option::of(prop::collection::btree_map(slot(), color(), 0..4)),
    )
        .prop_map(|(legacy, base, symbol, backgrounds, mode, custom_colors)| PartialIconConfig {
            mode,
            base,
            symbol,
            backgrounds,
            custom_colors,
            legacy_layers: legacy,
            ..PartialIconConfig::default()
        })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(partial in partial_config()) {
        let once = normalize(partial);
        let twice = normalize(PartialIconConfig::from(once.clone()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cleared_slot_never_comes_back(legacy in legacy_layers(), partial in partial_config()) {
        let mut config = normalize(PartialIconConfig {
            legacy_layers: Some(legacy),
            ..partial
        });
        config.base = None;
        config.symbol = None;

        let renormalized = normalize(PartialIconConfig::from(config.clone()));
        prop_assert_eq!(&renormalized, &config);

        let json = serde_json::to_string(&config).unwrap();
        let restored: IconConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, config);
    }

    #[test]
    fn normalized_stacks_are_contiguous(partial in partial_config()) {
        let config = normalize(partial);
        prop_assert!(config.backgrounds.is_contiguous());
        prop_assert!(config.foregrounds.is_contiguous());
    }

    #[test]
    fn json_round_trip_is_normalized(partial in partial_config()) {
        let config = normalize(partial);
        let json = serde_json::to_string(&config).unwrap();
        let restored: IconConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, config);
    }

    #[test]
    fn contrast_is_symmetric_and_bounded(a in color(), b in color()) {
        let ab = contrast_ratio(a, b);
        let ba = contrast_ratio(b, a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ab));
        prop_assert!((contrast_ratio(a, a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn custom_item_color_wins(slot in slot(), item_color in color(), map_color in color()) {
        let item = LayerStackItem::new("asset").with_color(item_color);
        let config = IconConfig::default()
            .with_custom_color(slot, map_color);
        let theme = ThemeCatalog::builtin().get("ocean");
        let resolved = ColorResolver::default().effective_color(slot, &config, theme, Some(&item));
        prop_assert_eq!(resolved, item_color);
    }

    #[test]
    fn theme_mode_ignores_custom_colors(slot in slot(), custom in color()) {
        let catalog = ThemeCatalog::builtin();
        let theme: &Theme = catalog.get("forest").unwrap();
        let mut config = IconConfig::default().with_custom_color(slot, custom).with_theme("forest");
        config.mode = IconMode::Theme;
        let resolved = ColorResolver::default().resolve_with_catalog(&config, &catalog);
        prop_assert_eq!(resolved.get(slot), theme.colors.get(slot));
    }

    #[test]
    fn undo_then_redo_restores(edits in prop::collection::vec(any::<u16>(), 1..40), k in 0usize..40) {
        let mut history = HistoryManager::new(0u16);
        let mut applied = vec![0u16];
        for value in edits {
            if history.set(value) {
                applied.push(value);
            }
        }

        let steps = k.min(applied.len() - 1);
        for _ in 0..steps {
            prop_assert!(history.undo());
        }
        prop_assert_eq!(*history.present(), applied[applied.len() - 1 - steps]);

        for _ in 0..steps {
            prop_assert!(history.redo());
        }
        prop_assert_eq!(*history.present(), *applied.last().unwrap());
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn setting_present_is_a_no_op(value in any::<u16>()) {
        let mut history = HistoryManager::new(value);
        prop_assert!(!history.set(value));
        prop_assert!(!history.can_undo());
    }

    #[test]
    fn export_round_trip(
        id in "[a-z0-9-]{1,12}",
        title in "[A-Za-z ]{1,20}",
        coins in 0i64..=10_000,
        icon in partial_config(),
    ) {
        let codec = ExportCodec::new().unwrap();
        let item = AchievementItem::new_draft(id.clone(), title)
            .with_reward(coins)
            .with_icon(normalize(icon));
        let json = codec.build_export(ExportArgs::new(&item, "user")).unwrap().to_json().unwrap();
        let restored = codec.extract_badge_item(&id, &json).unwrap();
        prop_assert_eq!(restored, item);
    }
}
