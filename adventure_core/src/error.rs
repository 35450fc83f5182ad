//! Error types for a game session.

use std::path::PathBuf;

use game_rules::LocationId;

/// Errors that can end or abort a game session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A world or config file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `GameConfig`.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The configured starting health would leave the player dead or above the ceiling.
    #[error("player_start_health must be between 1 and {max}, got {value}")]
    StartHealthOutOfRange { value: i32, max: i32 },

    /// The world file declared no locations.
    #[error("world contains no locations")]
    EmptyWorld,

    /// The configured start location does not exist.
    #[error("start location {0} does not exist")]
    UnknownStartLocation(LocationId),

    /// A chain of re-entrant sends went deeper than the configured ceiling.
    #[error("message chain exceeded depth {limit} while delivering '{tag}'")]
    DispatchDepthExceeded { limit: usize, tag: &'static str },

    /// The player's health reached zero.
    #[error("the player has died")]
    PlayerDied,
}

pub type Result<T> = std::result::Result<T, GameError>;
