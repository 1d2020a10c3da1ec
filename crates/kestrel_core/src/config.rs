//! # Registry Configuration
//!
//! Tunables for the ECS core. Loaded once at startup, usually as the `[ecs]`
//! table of the game's TOML config.

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Slots a freshly created component pool starts with.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// Number of default-initialized slots a component pool gets when it is
    /// first created. Pools still grow past this on demand.
    pub initial_pool_capacity: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            initial_pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl EcsConfig {
    /// Parses a config from TOML text. Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] if the text is not valid TOML for this
    /// struct.
    pub fn from_toml_str(text: &str) -> EcsResult<Self> {
        toml::from_str(text).map_err(|e| EcsError::InvalidConfig(e.to_string()))
    }
}
