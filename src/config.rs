//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "historyCapacity": 50,
//!   "rules": { "maxTitleLength": 100, "maxRewardCoins": 10000 },
//!   "contrastTarget": 4.5,
//!   "fallbackColors": {
//!     "base": "#7C3AED",
//!     "background": "#14B8A6",
//!     "foreground": "#F59E0B",
//!     "symbol": "#FFFFFF"
//!   },
//!   "exportTool": "badgesmith"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::SlotPalette;
use crate::contrast::{ContrastChecker, DEFAULT_CONTRAST_TARGET};
use crate::export::DEFAULT_EXPORT_TOOL;
use crate::history::{DEFAULT_HISTORY_CAPACITY, HistoryManager};
use crate::resolve::ColorResolver;
use crate::validate::ValidationRules;

/// Failure to load an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables shared by the editor, validation, contrast and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub history_capacity: usize,
    pub rules: ValidationRules,
    pub contrast_target: f64,
    pub fallback_colors: SlotPalette,
    pub export_tool: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rules: ValidationRules::default(),
            contrast_target: DEFAULT_CONTRAST_TARGET,
            fallback_colors: SlotPalette::FALLBACK,
            export_tool: DEFAULT_EXPORT_TOOL.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parses and checks a config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reads a config file. The file must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Rejects values the engine cannot work with.
    pub fn check(&self) -> Result<(), ConfigError> {
        if !(1.0..=21.0).contains(&self.contrast_target) {
            return Err(ConfigError::Invalid(format!(
                "contrastTarget must be between 1 and 21, got {}",
                self.contrast_target
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("historyCapacity must be at least 1".to_owned()));
        }
        if self.export_tool.trim().is_empty() {
            return Err(ConfigError::Invalid("exportTool must not be empty".to_owned()));
        }
        Ok(())
    }

    pub fn resolver(&self) -> ColorResolver {
        ColorResolver::new(self.fallback_colors)
    }

    pub fn checker(&self) -> ContrastChecker {
        ContrastChecker::new(self.contrast_target)
    }

    /// An undo manager sized by `historyCapacity`.
    pub fn new_history<T: Clone + PartialEq>(&self, initial: T) -> HistoryManager<T> {
        HistoryManager::with_capacity(initial, self.history_capacity)
    }
}
