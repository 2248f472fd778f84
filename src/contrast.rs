//! WCAG 2.1 contrast checks for resolved badge colours.
//!
//! Ratios run from 1 (identical luminance) to 21 (black on white). The
//! thresholds follow the WCAG conformance levels: 7 for AAA, 4.5 for AA and
//! 3 for AA on large text or graphical objects.

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::resolve::ResolvedColors;

/// Target ratio used when none is configured.
pub const DEFAULT_CONTRAST_TARGET: f64 = 4.5;

/// Per-channel adjustment applied on each step of [`adjust_color_for_contrast`].
pub const ADJUST_STEP: i16 = 5;

/// Upper bound on adjustment steps.
pub const ADJUST_MAX_STEPS: usize = 50;

const AAA_RATIO: f64 = 7.0;
const AA_RATIO: f64 = 4.5;
const AA_LARGE_RATIO: f64 = 3.0;

// ============================================================================
// Luminance
// ============================================================================

/// WCAG relative luminance of a colour, in `[0, 1]`.
pub fn relative_luminance(color: Color) -> f64 {
    let rgb: Srgb<f64> = color.as_srgb().into_format();
    let linear = |c: f64| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(rgb.red) + 0.7152 * linear(rgb.green) + 0.0722 * linear(rgb.blue)
}

/// Contrast ratio between two colours. Symmetric, always `>= 1`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ============================================================================
// Classification
// ============================================================================

/// WCAG conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ContrastLevel {
    #[serde(rename = "fail")]
    Fail,
    #[serde(rename = "AA-large")]
    AaLarge,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl ContrastLevel {
    /// Classifies a ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_RATIO {
            Self::Aaa
        } else if ratio >= AA_RATIO {
            Self::Aa
        } else if ratio >= AA_LARGE_RATIO {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    pub fn passes(&self) -> bool {
        *self != Self::Fail
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA-large",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contrast of one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PairContrast {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    pub level: ContrastLevel,
}

impl PairContrast {
    pub fn measure(foreground: Color, background: Color) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            level: ContrastLevel::from_ratio(ratio),
        }
    }
}

// ============================================================================
// Adjustment
// ============================================================================

/// Outcome of [`adjust_color_for_contrast`].
///
/// `achieved_target` is false when the step budget ran out first; `color` is
/// then the best colour found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContrastAdjustment {
    pub color: Color,
    pub ratio: f64,
    pub achieved_target: bool,
}

/// Nudges `foreground` away from `background` until `target` is met.
///
/// On a light background (luminance above 0.5) the foreground is darkened,
/// otherwise lightened, by [`ADJUST_STEP`] per channel for at most
/// [`ADJUST_MAX_STEPS`] steps.
pub fn adjust_color_for_contrast(foreground: Color, background: Color, target: f64) -> ContrastAdjustment {
    let initial = contrast_ratio(foreground, background);
    if initial >= target {
        return ContrastAdjustment {
            color: foreground,
            ratio: initial,
            achieved_target: true,
        };
    }

    let step = if relative_luminance(background) > 0.5 {
        -ADJUST_STEP
    } else {
        ADJUST_STEP
    };

    let mut best = ContrastAdjustment {
        color: foreground,
        ratio: initial,
        achieved_target: false,
    };
    let mut current = foreground;
    for _ in 0..ADJUST_MAX_STEPS {
        current = current.shifted(step);
        let ratio = contrast_ratio(current, background);
        if ratio >= target {
            return ContrastAdjustment {
                color: current,
                ratio,
                achieved_target: true,
            };
        }
        if ratio > best.ratio {
            best.color = current;
            best.ratio = ratio;
        }
    }

    tracing::debug!(
        foreground = %foreground,
        background = %background,
        target,
        best = best.ratio,
        "contrast target not reached"
    );
    best
}

// ============================================================================
// Badge report
// ============================================================================

/// Accessibility verdict for a badge's resolved colours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BadgeContrastReport {
    pub symbol_on_base: PairContrast,
    pub base_on_background: PairContrast,
    /// True only when neither pair fails.
    pub overall_accessible: bool,
    /// Suggested symbol colour when the symbol misses the target on its base.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_suggestion: Option<ContrastAdjustment>,
}

/// Checks badge colours against a configurable target ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastChecker {
    target: f64,
}

impl Default for ContrastChecker {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRAST_TARGET)
    }
}

impl ContrastChecker {
    pub fn new(target: f64) -> Self {
        Self { target }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn check(&self, colors: &ResolvedColors) -> BadgeContrastReport {
        let symbol_on_base = PairContrast::measure(colors.symbol, colors.base);
        let base_on_background = PairContrast::measure(colors.base, colors.background);
        let symbol_suggestion = (symbol_on_base.ratio < self.target)
            .then(|| adjust_color_for_contrast(colors.symbol, colors.base, self.target));

        BadgeContrastReport {
            symbol_on_base,
            base_on_background,
            overall_accessible: symbol_on_base.level.passes() && base_on_background.level.passes(),
            symbol_suggestion,
        }
    }
}

/// Checks badge colours with the default target.
pub fn check_badge_contrast(colors: &ResolvedColors) -> BadgeContrastReport {
    ContrastChecker::default().check(colors)
}

// ============================================================================
// Tests
// ============================================================================
