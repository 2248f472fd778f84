//! Draft and publish readiness checks.
//!
//! Validation never fails: it returns a [`ValidationReport`] listing every
//! broken rule, and the caller decides whether to block the action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::achievement::AchievementItem;

/// Default upper bound for `title` length, in characters.
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 100;

/// Default upper bound for `reward_coins`.
pub const DEFAULT_MAX_REWARD_COINS: i64 = 10_000;

/// Limits applied by [`validate_for_publish`] and [`validate_for_draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    pub max_title_length: usize,
    pub max_reward_coins: i64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            max_reward_coins: DEFAULT_MAX_REWARD_COINS,
        }
    }
}

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The outcome of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Checks everything required before an item can be published.
pub fn validate_for_publish(item: &AchievementItem, rules: &ValidationRules) -> ValidationReport {
    let mut violations = Vec::new();

    let title = item.title.trim();
    if title.is_empty() {
        violations.push(Violation::new("title", "title is required"));
    } else if title.chars().count() > rules.max_title_length {
        violations.push(Violation::new(
            "title",
            format!("title must be at most {} characters", rules.max_title_length),
        ));
    }

    if !item.icon.has_anchor() {
        violations.push(Violation::new(
            "icon",
            "icon needs a base shape or a symbol",
        ));
    }

    check_reward(item, rules, &mut violations);
    ValidationReport { violations }
}

/// Checks the few rules that hold even while an item is a draft.
pub fn validate_for_draft(item: &AchievementItem, rules: &ValidationRules) -> ValidationReport {
    let mut violations = Vec::new();
    check_reward(item, rules, &mut violations);
    ValidationReport { violations }
}

fn check_reward(item: &AchievementItem, rules: &ValidationRules, violations: &mut Vec<Violation>) {
    if !(0..=rules.max_reward_coins).contains(&item.reward_coins) {
        violations.push(Violation::new(
            "rewardCoins",
            format!("reward must be between 0 and {}", rules.max_reward_coins),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconConfig;
    use crate::layer::{LayerStack, LayerStackItem};

    fn anchored(title: &str) -> AchievementItem {
        AchievementItem::new_draft("a1", title).with_icon(IconConfig {
            symbol: Some(LayerStackItem::new("star")),
            ..IconConfig::default()
        })
    }

    #[test]
    fn valid_item_passes() {
        let report = validate_for_publish(&anchored("Collector").with_reward(10_000), &ValidationRules::default());
        assert!(report.is_valid(), "{report:?}");
    }

    #[test]
    fn empty_title_and_missing_anchor_report_both() {
        let item = AchievementItem::new_draft("a1", "   ");
        let report = validate_for_publish(&item, &ValidationRules::default());
        assert_eq!(report.violations.len(), 2);
        assert!(report.has_field("title"));
        assert!(report.has_field("icon"));
    }

    #[test]
    fn decorations_alone_are_not_an_anchor() {
        let item = AchievementItem::new_draft("a1", "Decorated").with_icon(IconConfig {
            backgrounds: LayerStack::new().with_added("rays"),
            foregrounds: LayerStack::new().with_added("sparkles"),
            ..IconConfig::default()
        });
        let report = validate_for_publish(&item, &ValidationRules::default());
        assert!(report.has_field("icon"));
    }

    #[test]
    fn long_title_rejected() {
        let rules = ValidationRules {
            max_title_length: 5,
            ..ValidationRules::default()
        };
        let report = validate_for_publish(&anchored("Too long"), &rules);
        assert!(report.has_field("title"));
        assert!(validate_for_publish(&anchored("Short"), &rules).is_valid());
    }

    #[test]
    fn reward_bounds() {
        let rules = ValidationRules::default();
        for coins in [-1, 10_001] {
            let item = anchored("Coins").with_reward(coins);
            assert!(validate_for_publish(&item, &rules).has_field("rewardCoins"));
            assert!(validate_for_draft(&item, &rules).has_field("rewardCoins"));
        }
        assert!(validate_for_publish(&anchored("Coins").with_reward(0), &rules).is_valid());
    }

    #[test]
    fn draft_ignores_incomplete_fields() {
        let item = AchievementItem::new_draft("a1", "");
        assert!(validate_for_draft(&item, &ValidationRules::default()).is_valid());
    }

    #[test]
    fn violations_display() {
        let v = Violation::new("title", "title is required");
        assert_eq!(v.to_string(), "title: title is required");
    }
}
