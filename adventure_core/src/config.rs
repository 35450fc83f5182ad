//! Session configuration.

use std::path::{Path, PathBuf};

use game_rules::{HealthPool, LocationId, PLAYER_MAX_HEALTH};
use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::messaging::DEFAULT_MAX_DISPATCH_DEPTH;

/// Configuration for one game session.
///
/// Every key is optional in the TOML form; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World file loaded when none is given on the command line.
    pub world_path: PathBuf,

    /// Location the player starts in.
    pub start_location: u32,

    /// Deepest allowed chain of re-entrant message deliveries.
    pub max_dispatch_depth: usize,

    /// Health the player starts with, in `1..=PLAYER_MAX_HEALTH`.
    pub player_start_health: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_path: PathBuf::from("world/example_world.txt"),
            start_location: 1,
            max_dispatch_depth: DEFAULT_MAX_DISPATCH_DEPTH,
            player_start_health: PLAYER_MAX_HEALTH,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.player_health()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn with_world_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.world_path = path.into();
        self
    }

    #[must_use]
    pub fn with_start_location(mut self, id: u32) -> Self {
        self.start_location = id;
        self
    }

    #[must_use]
    pub fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }

    pub fn start(&self) -> LocationId {
        LocationId(self.start_location)
    }

    /// The player's starting health pool. The ceiling is always `PLAYER_MAX_HEALTH`.
    pub fn player_health(&self) -> Result<HealthPool> {
        let value = self.player_start_health;
        if !(1..=PLAYER_MAX_HEALTH).contains(&value) {
            return Err(GameError::StartHealthOutOfRange {
                value,
                max: PLAYER_MAX_HEALTH,
            });
        }
        Ok(HealthPool::new(value, PLAYER_MAX_HEALTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.start(), LocationId(1));
        assert_eq!(config.player_health().unwrap(), HealthPool::new(5, 5));
        assert_eq!(config.max_dispatch_depth, DEFAULT_MAX_DISPATCH_DEPTH);
    }

    #[test]
    fn test_partial_toml_falls_back() {
        let config = GameConfig::from_toml_str(
            r#"
            world_path = "worlds/castle.txt"
            max_dispatch_depth = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.world_path, PathBuf::from("worlds/castle.txt"));
        assert_eq!(config.max_dispatch_depth, 16);
        assert_eq!(config.start_location, 1);
        assert_eq!(config.player_start_health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_start_health_must_leave_player_alive() {
        let config = GameConfig::from_toml_str("player_start_health = 2").unwrap();
        assert_eq!(config.player_health().unwrap(), HealthPool::new(2, 5));

        for text in ["player_start_health = 0", "player_start_health = 6"] {
            let result = GameConfig::from_toml_str(text);
            assert!(matches!(
                result,
                Err(GameError::StartHealthOutOfRange { max: 5, .. })
            ));
        }
    }

    #[test]
    fn test_ceiling_is_not_configurable() {
        let config = GameConfig::from_toml_str("player_max_health = 9").unwrap();
        assert_eq!(config.player_health().unwrap().max, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_invalid_toml() {
        let result = GameConfig::from_toml_str("start_location = \"upstairs\"");
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::default()
            .with_world_path("w.txt")
            .with_start_location(3)
            .with_max_dispatch_depth(8);
        assert_eq!(config.start(), LocationId(3));
        assert_eq!(config.world_path, PathBuf::from("w.txt"));
        assert_eq!(config.max_dispatch_depth, 8);
    }
}
