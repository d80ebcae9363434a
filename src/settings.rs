//! Driver settings with persistence
//!
//! Settings are saved to `~/.config/platformer/settings.toml`

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use platformer_core::TimeConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All driver settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Controller profile file; built-in profiles are used when unset
    pub profiles_path: Option<PathBuf>,
    pub time: TimeConfig,
    pub scenario: ScenarioSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("platformer"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, writing defaults");
            let settings = Self::default();
            if let Err(e) = settings.save() {
                warn!("Failed to save default settings: {}", e);
            }
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Rejected settings: {:#}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings and reject values the fixed-step loop cannot run with
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let positive = [
            ("time.fixed_timestep", self.time.fixed_timestep),
            ("time.max_delta_time", self.time.max_delta_time),
            ("time.time_scale", self.time.time_scale),
            ("scenario.frame_time", self.scenario.frame_time),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                anyhow::bail!("{} must be finite and positive, got {}", field, value);
            }
        }
        if !(self.scenario.duration.is_finite() && self.scenario.duration >= 0.0) {
            anyhow::bail!(
                "scenario.duration must be finite and non-negative, got {}",
                self.scenario.duration
            );
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless scenario settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Number of players sharing one profile set
    pub players: usize,
    /// Simulated seconds to run
    pub duration: f32,
    /// Simulated frame time fed to the fixed-step accumulator
    pub frame_time: f32,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            players: 3,
            duration: 6.0,
            frame_time: 1.0 / 60.0,
        }
    }
}
