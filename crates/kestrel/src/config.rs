//! # Game Configuration
//!
//! Loaded once at startup from TOML. Every key is optional:
//!
//! ```toml
//! target_fps = 30
//! window_width = 1024
//! window_height = 768
//! debug = true
//!
//! [ecs]
//! initial_pool_capacity = 256
//! ```

use std::time::Duration;

use kestrel_core::EcsConfig;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Tile edge length of the jungle map, in texture pixels.
pub const TILE_SIZE: u32 = 32;

/// Draw scale applied to map tiles.
pub const TILE_SCALE: u32 = 4;

/// Configuration for a [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Window width in pixels. Also the camera width.
    pub window_width: u32,
    /// Window height in pixels. Also the camera height.
    pub window_height: u32,
    /// Map width in world units. The camera never leaves the map.
    pub map_width: u32,
    /// Map height in world units.
    pub map_height: u32,
    /// Start with debug overlays enabled.
    pub debug: bool,
    /// Registry tunables.
    pub ecs: EcsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            window_width: 800,
            window_height: 600,
            map_width: 25 * TILE_SIZE * TILE_SCALE,
            map_height: 20 * TILE_SIZE * TILE_SCALE,
            debug: false,
            ecs: EcsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses a config from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`] if the text does not parse or
    /// `target_fps` is zero.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`] naming the offending key.
    pub fn validate(&self) -> GameResult<()> {
        if self.target_fps == 0 {
            return Err(GameError::InvalidConfig("target_fps must be positive".into()));
        }
        Ok(())
    }

    /// Time budget of one frame at `target_fps`.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_jungle_map() {
        let config = GameConfig::default();
        assert_eq!(config.map_width, 3200);
        assert_eq!(config.map_height, 2560);
        assert_eq!(config.ecs.initial_pool_capacity, 100);
        assert!(!config.debug);
    }

    #[test]
    fn test_frame_duration() {
        let config = GameConfig::default();
        assert_eq!(config.frame_duration().as_micros(), 16_666);

        let config = GameConfig {
            target_fps: 30,
            ..GameConfig::default()
        };
        assert_eq!(config.frame_duration().as_millis(), 33);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = GameConfig::from_toml_str(
            "target_fps = 30\ndebug = true\n[ecs]\ninitial_pool_capacity = 8\n",
        )
        .unwrap();
        assert_eq!(config.target_fps, 30);
        assert!(config.debug);
        assert_eq!(config.ecs.initial_pool_capacity, 8);
        assert_eq!(config.window_width, 800);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = GameConfig::from_toml_str("target_fps = 0").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(GameConfig::from_toml_str("window_width = [").is_err());
    }
}
