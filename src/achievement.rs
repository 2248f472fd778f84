//! The badge document edited in the builder.

use serde::{Deserialize, Serialize};

use crate::icon::IconConfig;
use crate::validate::{ValidationReport, ValidationRules, validate_for_publish};

/// Publication state of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum AchievementStatus {
    #[default]
    Draft,
    Published,
}

/// A badge: display text, reward, publishing constraints and icon.
///
/// `reward_coins` is signed so that out-of-range values coming from clients
/// survive deserialization and are reported by validation instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AchievementItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward_coins: i64,
    #[serde(default)]
    pub status: AchievementStatus,
    /// Bumped on each confirmed save; starts at 1.
    #[serde(default = "first_version")]
    pub version: u32,
    /// Roles allowed to publish or award the badge. Empty means any role.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Organisations the badge is offered to. Empty means every organisation.
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub icon: IconConfig,
}

fn first_version() -> u32 {
    1
}

impl AchievementItem {
    /// Creates a draft at version 1 with an empty icon.
    pub fn new_draft(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            reward_coins: 0,
            status: AchievementStatus::Draft,
            version: first_version(),
            roles: Vec::new(),
            organizations: Vec::new(),
            icon: IconConfig::default(),
        }
    }

    pub fn with_icon(mut self, icon: IconConfig) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_reward(mut self, coins: i64) -> Self {
        self.reward_coins = coins;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == AchievementStatus::Published
    }

    /// Records a confirmed save of a previously stored item.
    pub fn confirm_save(&mut self) {
        self.version = self.version.saturating_add(1);
    }

    /// Publishes the item if it passes publish validation.
    pub fn publish(&mut self, rules: &ValidationRules) -> Result<(), ValidationReport> {
        let report = validate_for_publish(self, rules);
        if !report.is_valid() {
            return Err(report);
        }
        self.status = AchievementStatus::Published;
        Ok(())
    }

    /// Returns the item to draft.
    pub fn unpublish(&mut self) {
        self.status = AchievementStatus::Draft;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerStackItem;
    use serde_json::json;

    #[test]
    fn new_draft_starts_at_version_one() {
        let item = AchievementItem::new_draft("a1", "First Steps");
        assert_eq!(item.status, AchievementStatus::Draft);
        assert_eq!(item.version, 1);
        assert!(!item.is_published());
    }

    #[test]
    fn confirm_save_bumps_version() {
        let mut item = AchievementItem::new_draft("a1", "First Steps");
        item.confirm_save();
        item.confirm_save();
        assert_eq!(item.version, 3);
    }

    #[test]
    fn publish_requires_valid_item() {
        let rules = ValidationRules::default();

        let mut incomplete = AchievementItem::new_draft("a1", "");
        let report = incomplete.publish(&rules).unwrap_err();
        assert!(report.violations.len() >= 2);
        assert_eq!(incomplete.status, AchievementStatus::Draft);

        let mut ready = AchievementItem::new_draft("a2", "Explorer").with_icon(IconConfig {
            base: Some(LayerStackItem::new("circle")),
            ..IconConfig::default()
        });
        ready.publish(&rules).unwrap();
        assert!(ready.is_published());

        ready.unpublish();
        assert_eq!(ready.status, AchievementStatus::Draft);
    }

    #[test]
    fn deserializes_with_defaults_and_legacy_icon() {
        let item: AchievementItem = serde_json::from_value(json!({
            "id": "a1",
            "title": "Streak",
            "rewardCoins": 50,
            "icon": { "layers": { "base": "circle", "symbol": "flame" } }
        }))
        .unwrap();

        assert_eq!(item.version, 1);
        assert_eq!(item.status, AchievementStatus::Draft);
        assert_eq!(item.icon.base.as_ref().unwrap().id, "circle");
        assert_eq!(item.icon.symbol.as_ref().unwrap().id, "flame");
        assert!(item.roles.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let item = AchievementItem::new_draft("a1", "Streak").with_reward(10);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["rewardCoins"], 10);
        assert_eq!(value["status"], "draft");
        assert_eq!(value["icon"]["mode"], "theme");
    }
}
