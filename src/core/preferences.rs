use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage key holding the serialized sound preferences.
pub const PREFERENCES_KEY: &str = "earthquakeSoundPreferences";

pub const DEFAULT_VOLUME: f32 = 0.7;

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preference storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Host-provided key-value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundPreferences {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for SoundPreferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            enabled: true,
        }
    }
}

impl SoundPreferences {
    /// Reads preferences from `store`, falling back to defaults when nothing
    /// is stored or the stored value can't be used.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let stored = match store.get(PREFERENCES_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                log::debug!("No stored sound preferences, using defaults");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not load sound preferences: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&stored) {
            Ok(preferences) if preferences.volume.is_finite() => {
                let preferences = Self {
                    volume: preferences.volume.clamp(0.0, 1.0),
                    ..preferences
                };
                log::info!(
                    "Loaded sound preferences (volume {}%, {})",
                    preferences.volume_percent(),
                    if preferences.enabled { "enabled" } else { "disabled" }
                );
                preferences
            }
            Ok(_) => {
                log::warn!("Stored sound volume is not a number, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not parse stored sound preferences ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Writes preferences to `store`. Failures are logged and swallowed.
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        let serialized = match serde_json::to_string(self) {
            Ok(serialized) => serialized,
            Err(e) => {
                log::warn!("Could not serialize sound preferences: {}", e);
                return;
            }
        };

        if let Err(e) = store.set(PREFERENCES_KEY, &serialized) {
            log::warn!("Could not save sound preferences: {}", e);
        }
    }

    pub fn volume_percent(&self) -> u32 {
        (self.volume * 100.0).round() as u32
    }
}

/// In-memory store, useful for hosts without persistence and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk mapping keys to string values.
///
/// The file is re-read on every access so edits made by another instance are
/// picked up; a missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the application config file.
    pub fn in_config_dir() -> Self {
        Self::new(crate::core::config_dir().join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt { .. }) => {
                log::warn!("Replacing corrupt preference file at {}", self.path.display());
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Saved preference '{}' to {}", key, self.path.display());
        Ok(())
    }
}
