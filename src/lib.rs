//! badgesmith: badge definition engine
//!
//! This crate models achievement badges built from layered icons: it
//! normalizes icon configurations (including the legacy single-value layer
//! shape), resolves per-slot colours from themes and custom overrides,
//! checks WCAG contrast, keeps undo/redo history for the editor, validates
//! badges for drafting and publishing, and converts badges to and from a
//! versioned interchange document.
//!
//! # Example
//!
//! ```
//! use badgesmith::{
//!     AchievementItem, ColorResolver, ContrastChecker, IconConfig, LayerStackItem,
//!     ThemeCatalog, ValidationRules,
//! };
//!
//! let icon = IconConfig {
//!     base: Some(LayerStackItem::new("shield")),
//!     symbol: Some(LayerStackItem::new("star")),
//!     ..IconConfig::default()
//! }
//! .with_theme("ocean");
//!
//! let colors = ColorResolver::default().resolve_with_catalog(&icon, &ThemeCatalog::builtin());
//! let report = ContrastChecker::default().check(&colors);
//! println!("symbol on base: {:.2}", report.symbol_on_base.ratio);
//!
//! let mut badge = AchievementItem::new_draft("badge-1", "Deep Diver").with_icon(icon);
//! badge.publish(&ValidationRules::default()).unwrap();
//! ```
//!
//! # Editing History
//!
//! ```
//! use badgesmith::{HistoryManager, IconConfig};
//!
//! let mut history = HistoryManager::new(IconConfig::default());
//! history.update(|icon| icon.clone().with_theme("forest"));
//! assert!(history.undo());
//! assert_eq!(history.present(), &IconConfig::default());
//! ```

mod achievement;
mod color;
mod config;
mod contrast;
mod export;
mod history;
mod icon;
mod layer;
mod preset;
mod resolve;
mod theme;
mod validate;

pub use achievement::{AchievementItem, AchievementStatus};
pub use color::{Color, ColorParseError, LayerSlot, SlotPalette};
pub use config::{ConfigError, EngineConfig};
pub use contrast::{
    ADJUST_MAX_STEPS, ADJUST_STEP, BadgeContrastReport, ContrastAdjustment, ContrastChecker,
    ContrastLevel, DEFAULT_CONTRAST_TARGET, PairContrast, adjust_color_for_contrast,
    check_badge_contrast, contrast_ratio, relative_luminance,
};
pub use export::{
    AchievementEntry, BadgeStyle, CanonicalExport, DEFAULT_EXPORT_TOOL, ExportArgs, ExportCodec,
    ExportError, ExportedBy, FieldViolation, IconReference, PublishScope, SCHEMA_VERSION, Unlock,
    UnlockCriteria, UnlockKind, Visibility, export_schema,
};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryManager, HistoryState};
pub use icon::{IconConfig, IconMode, IconSize, LegacyLayers, PartialIconConfig, normalize};
pub use layer::{LayerStack, LayerStackItem};
pub use preset::{FilePresetStore, MemoryPresetStore, PresetError, PresetStore};
pub use resolve::{ColorResolver, ResolvedColors, effective_color};
pub use theme::{Theme, ThemeCatalog};
pub use validate::{
    DEFAULT_MAX_REWARD_COINS, DEFAULT_MAX_TITLE_LENGTH, ValidationReport, ValidationRules,
    Violation, validate_for_draft, validate_for_publish,
};
