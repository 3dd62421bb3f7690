//! Tunable settings, loadable from a JSON file.
//!
//! Every section is optional in the file; anything missing falls back to the
//! defaults in [`crate::constants`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dungeon_gen::GeneratorConfig;
use crate::sensor::{GestureThresholds, SensorConfig};
use crate::torch::TorchConfig;
use crate::vfx::EffectDurations;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchlitConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub generator: GeneratorConfig,
    pub torch: TorchConfig,
    pub effects: EffectDurations,
    pub sensor: SensorConfig,
}

impl Default for TorchlitConfig {
    fn default() -> Self {
        Self {
            map_width: DUNGEON_DEFAULT_WIDTH,
            map_height: DUNGEON_DEFAULT_HEIGHT,
            generator: GeneratorConfig::default(),
            torch: TorchConfig::default(),
            effects: EffectDurations::default(),
            sensor: SensorConfig::default(),
        }
    }
}

impl TorchlitConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Shorthand for the gesture section of the sensor settings
    pub fn gesture(&self) -> &GestureThresholds {
        &self.sensor.gesture
    }
}
