//! # Adventure Core
//!
//! The running half of Zorkish. Builds on `game_rules` with everything that
//! moves state around: the message dispatcher, the handlers entities, locations
//! and the player answer with, the world file loader and the verb layer.
//!
//! ## Core Components
//!
//! - **messaging**: Recipient identities, typed messages and the re-entrant dispatcher
//! - **handlers**: Capability-driven reactions to messages
//! - **loader**: Parses the indented world format into a `World`
//! - **commands**: Player verbs and aliases
//! - **game**: A session tying the pieces together
//!
//! ## Design Philosophy
//!
//! - **Message-Driven**: Commands never touch entities directly, they send messages
//! - **Capability-Driven**: What an entity does is decided by the components it has
//! - **Quiet Library**: Narration goes to a transcript; only the binary prints

pub mod commands;
pub mod config;
pub mod error;
pub mod game;
pub mod handlers;
pub mod loader;
pub mod messaging;
pub mod player;
pub mod registry;
pub mod transcript;

pub use commands::{AliasError, CommandManager, Verb};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Game, SessionStatus};
pub use handlers::GameState;
pub use loader::{load_world_file, load_world_str, LoadSummary, Properties};
pub use messaging::{
    Dispatcher, Message, MessageHandler, MessageKind, RecipientId, Route,
    DEFAULT_MAX_DISPATCH_DEPTH,
};
pub use player::Player;
pub use transcript::Transcript;
