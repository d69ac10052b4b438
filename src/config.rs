//! Configuration management for termdeck
//!
//! The file lives at `~/.config/termdeck/config.toml` (platform config
//! dir). Every field has a default, so a missing file or a partial one
//! both load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::control::DEFAULT_PORT;
use crate::player::DEFAULT_FRAME_RATE;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub control: ControlConfig,
    pub playback: PlaybackConfig,
    pub console: ConsoleConfig,
}

/// Remote control server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Start the control server alongside the player
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Transition frames per second
    pub frame_rate: u32,
    /// Use the light slide theme
    pub light: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            light: false,
        }
    }
}

/// Presenter console settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Countdown timer start value
    pub timer_minutes: u64,
    /// How often the console asks the player for its position
    pub poll_interval_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            timer_minutes: 45,
            poll_interval_ms: 500,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("termdeck").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config text. Missing sections and fields take defaults.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as pretty TOML, the form `config show` prints.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
