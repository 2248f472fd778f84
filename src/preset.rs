//! Named icon presets.
//!
//! A preset is an [`IconConfig`] saved under a name so it can be applied to
//! other badges. Storage sits behind [`PresetStore`]; the crate ships an
//! in-memory store and a store backed by a single JSON file.
//!
//! ```
//! use badgesmith::{IconConfig, MemoryPresetStore, PresetStore};
//!
//! let mut store = MemoryPresetStore::new();
//! store.set("gold-star", IconConfig::default().with_theme("gold")).unwrap();
//!
//! assert_eq!(store.list().unwrap(), ["gold-star"]);
//! assert!(store.get("gold-star").unwrap().is_some());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::icon::{IconConfig, PartialIconConfig, normalize};

/// Failure to read or write presets.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset name must not be empty")]
    EmptyName,

    #[error("failed to access preset file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("preset file {} is not valid JSON: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// PresetStore
// ============================================================================

/// Storage for named icon presets.
///
/// Implementations normalize configs on [`set`](Self::set), so everything
/// returned by [`get`](Self::get) is canonical.
pub trait PresetStore {
    /// Returns the preset saved under `name`, if any.
    fn get(&self, name: &str) -> Result<Option<IconConfig>, PresetError>;

    /// Saves `config` under `name`, replacing any previous preset.
    fn set(&mut self, name: &str, config: IconConfig) -> Result<(), PresetError>;

    /// Preset names in ascending order.
    fn list(&self) -> Result<Vec<String>, PresetError>;

    /// Removes a preset. Returns whether it existed.
    fn delete(&mut self, name: &str) -> Result<bool, PresetError>;
}

fn canonical(name: &str, config: IconConfig) -> Result<IconConfig, PresetError> {
    if name.trim().is_empty() {
        return Err(PresetError::EmptyName);
    }
    Ok(normalize(PartialIconConfig::from(config)))
}

// ============================================================================
// MemoryPresetStore
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStore {
    presets: BTreeMap<String, IconConfig>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn get(&self, name: &str) -> Result<Option<IconConfig>, PresetError> {
        Ok(self.presets.get(name).cloned())
    }

    fn set(&mut self, name: &str, config: IconConfig) -> Result<(), PresetError> {
        let config = canonical(name, config)?;
        self.presets.insert(name.to_owned(), config);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        Ok(self.presets.keys().cloned().collect())
    }

    fn delete(&mut self, name: &str) -> Result<bool, PresetError> {
        Ok(self.presets.remove(name).is_some())
    }
}

// ============================================================================
// FilePresetStore
// ============================================================================

/// Presets kept in one JSON object on disk, keyed by name.
///
/// The file is read on every call and rewritten whole on every change, going
/// through a sibling temp file and a rename. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    path: PathBuf,
}

impl FilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, IconConfig>, PresetError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PresetError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| PresetError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, presets: &BTreeMap<String, IconConfig>) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(presets).map_err(|source| PresetError::Format {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let io_err = |source| PresetError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), presets = presets.len(), "wrote preset file");
        Ok(())
    }
}

impl PresetStore for FilePresetStore {
    fn get(&self, name: &str) -> Result<Option<IconConfig>, PresetError> {
        Ok(self.read_all()?.remove(name))
    }

    fn set(&mut self, name: &str, config: IconConfig) -> Result<(), PresetError> {
        let config = canonical(name, config)?;
        let mut presets = self.read_all()?;
        presets.insert(name.to_owned(), config);
        self.write_all(&presets)
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn delete(&mut self, name: &str) -> Result<bool, PresetError> {
        let mut presets = self.read_all()?;
        if presets.remove(name).is_none() {
            return Ok(false);
        }
        self.write_all(&presets)?;
        Ok(true)
    }
}
