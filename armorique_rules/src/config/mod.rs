//! Simulation configuration, loadable from TOML.
//!
//! Every field has a default, so a partial file only overrides what it names:
//!
//! ```toml
//! [healing]
//! herb_spawn_interval = 4
//!
//! [setup]
//! location_count = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Passive healing resources of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealingConfig {
    /// Herbs spawn every this many turns in town-like locations.
    pub herb_spawn_interval: u32,
    pub herb_spawn_amount: u32,
    /// Health restored by one herb.
    pub herb_heal: f64,
    /// Health restored by one food item when no herb is left.
    pub food_heal: f64,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            herb_spawn_interval: 3,
            herb_spawn_amount: 2,
            herb_heal: 50.0,
            food_heal: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HungerConfig {
    /// Damage a hungry character takes on every simulation step.
    pub hunger_damage: f64,
}

impl Default for HungerConfig {
    fn default() -> Self {
        Self { hunger_damage: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderConfig {
    /// Health given to every resident by the leader's heal order.
    pub heal_amount: f64,
}

impl Default for LeaderConfig {
    fn default() -> Self {
        Self { heal_amount: 10.0 }
    }
}

/// Parameters for building a custom world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub theater_name: String,
    pub location_count: usize,
    pub default_area: f64,
    pub food_per_location: usize,
    pub characters_per_location: usize,
    pub initial_strength: f64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            theater_name: "Armorique".to_string(),
            location_count: 5,
            default_area: 200.0,
            food_per_location: 5,
            characters_per_location: 3,
            initial_strength: 0.7,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub healing: HealingConfig,
    pub hunger: HungerConfig,
    pub leader: LeaderConfig,
    pub setup: SetupConfig,
}

impl SimulationConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
