use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Directory holding the config file, stored preferences and exported sounds.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quake-chime")
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output device to play through. `None` uses the system default.
    #[serde(default)]
    pub output_device_name: Option<String>,
    pub export_directory: PathBuf,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_device_name: None,
            export_directory: config_dir().join("sounds"),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

            match serde_json::from_str::<Self>(&content) {
                Ok(config) => {
                    log::info!("Loaded existing config from {}", config_path.display());
                    Ok(config.sanitized())
                }
                Err(e) => {
                    log::warn!("Config file exists but has issues ({}), replacing it with defaults", e);
                    let config = Self::default();
                    config.save_to(config_path)
                        .map_err(|save_err| anyhow::anyhow!("Failed to save new config: {}", save_err))?;
                    Ok(config)
                }
            }
        } else {
            log::info!("No config file found, creating default config");
            let config = Self::default();
            config.save_to(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
            log::info!("Created new config file at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        config_dir().join("config.json")
    }

    fn sanitized(mut self) -> Self {
        if self.sample_rate < 8_000 {
            log::warn!("Sample rate {} is too low, using {}", self.sample_rate, DEFAULT_SAMPLE_RATE);
            self.sample_rate = DEFAULT_SAMPLE_RATE;
        }
        self
    }
}
