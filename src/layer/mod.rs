//! Decorative layer references and ordered layer stacks.
//!
//! A badge icon is composed of a single base shape, a single symbol and two
//! ordered stacks of decorations (backgrounds behind the base, foregrounds
//! above it). Each entry is a [`LayerStackItem`] pointing at an asset in the
//! shape catalogue.
//!
//! Stacks are edited through the pure operations on [`LayerStack`]: every
//! operation returns a new stack and leaves its input untouched.

mod stack;

pub use stack::LayerStack;

use serde::{Deserialize, Serialize};

use crate::color::Color;

// ============================================================================
// LayerStackItem
// ============================================================================

/// A reference to a decorative asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LayerStackItem {
    /// Asset catalogue id.
    pub id: String,

    /// Per-item colour override, honoured in custom colour mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Stacking position within the owning stack, contiguous from 0.
    #[serde(default)]
    pub order: u32,
}

impl LayerStackItem {
    /// Creates an item at order 0 without a colour override.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: None,
            order: 0,
        }
    }

    /// Sets the colour override.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the stacking position.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}
