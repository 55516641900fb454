use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::model::types::Autostart;
use crate::utils::errors::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackDefaults,

    #[serde(default)]
    pub dvr: DvrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackDefaults {
    #[serde(default = "default_volume")]
    pub volume: f64,

    #[serde(default)]
    pub mute: bool,

    #[serde(default)]
    pub autostart: Autostart,

    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DvrConfig {
    #[serde(default = "default_min_dvr_window")]
    pub min_dvr_window: f64,

    #[serde(default = "default_dvr_seek_limit")]
    pub dvr_seek_limit: f64,
}

impl PlayerConfig {
    pub fn load() -> Result<Self, Error> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let config = Self::load_from(&config_path)?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = PlayerConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let config: PlayerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Error> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Configuration("no config directory".to_string()))?;
        Ok(config_dir.join("timerail").join("config.toml"))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackDefaults::default(),
            dvr: DvrConfig::default(),
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            mute: false,
            autostart: Autostart::default(),
            playback_rate: default_playback_rate(),
        }
    }
}

impl Default for DvrConfig {
    fn default() -> Self {
        Self {
            min_dvr_window: default_min_dvr_window(),
            dvr_seek_limit: default_dvr_seek_limit(),
        }
    }
}

// Default value functions
fn default_volume() -> f64 {
    90.0
}
fn default_playback_rate() -> f64 {
    1.0
}
fn default_min_dvr_window() -> f64 {
    120.0
}
fn default_dvr_seek_limit() -> f64 {
    25.0
}
