//! A game session: one dispatcher, one world, one player.

use std::path::Path;

use game_rules::{EntityId, LocationId, World};
use tracing::{error, info};

use crate::commands::{self, CommandManager};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::handlers::GameState;
use crate::loader::{self, LoadSummary};
use crate::messaging::{Dispatcher, Message, RecipientId, Route};
use crate::player::Player;
use crate::transcript::Transcript;

/// Where a session stands after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Quit,
    PlayerDied,
}

/// A running game.
#[derive(Debug)]
pub struct Game {
    pub(crate) dispatcher: Dispatcher,
    pub(crate) state: GameState,
    pub(crate) commands: CommandManager,
    world_name: String,
    summary: LoadSummary,
    status: SessionStatus,
}

impl Game {
    /// Load the world file named in `config`.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::load(&config.world_path, config)
    }

    /// Load a world file. The world name is the file stem.
    pub fn load(path: impl AsRef<Path>, config: &GameConfig) -> Result<Self> {
        let path = path.as_ref();
        let world_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());

        let mut dispatcher = Self::dispatcher_for(config);
        let (world, summary) = loader::load_world_file(path, &mut dispatcher)?;
        Self::assemble(dispatcher, world, summary, world_name, config)
    }

    /// Build a session from world text.
    pub fn from_world_str(
        text: &str,
        world_name: impl Into<String>,
        config: &GameConfig,
    ) -> Result<Self> {
        let mut dispatcher = Self::dispatcher_for(config);
        let (world, summary) = loader::load_world_str(text, &mut dispatcher);
        Self::assemble(dispatcher, world, summary, world_name.into(), config)
    }

    fn dispatcher_for(config: &GameConfig) -> Dispatcher {
        let mut dispatcher = Dispatcher::with_max_depth(config.max_dispatch_depth);
        dispatcher.register(RecipientId::player(), Route::Player);
        dispatcher
    }

    fn assemble(
        dispatcher: Dispatcher,
        world: World,
        summary: LoadSummary,
        world_name: String,
        config: &GameConfig,
    ) -> Result<Self> {
        if world.location_count() == 0 {
            return Err(GameError::EmptyWorld);
        }
        let start = config.start();
        if world.location(start).is_none() {
            return Err(GameError::UnknownStartLocation(start));
        }

        let player = Player::new(start, config.player_health()?);
        info!(world = %world_name, %start, "session ready");
        Ok(Self {
            dispatcher,
            state: GameState::new(world, player),
            commands: CommandManager::default(),
            world_name,
            summary,
            status: SessionStatus::Running,
        })
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    pub fn load_summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Take all narration produced so far.
    pub fn drain_output(&mut self) -> Vec<String> {
        self.state.transcript.drain()
    }

    pub(crate) fn say(&mut self, line: impl Into<String>) {
        self.state.transcript.say(line);
    }

    /// Deliver a message through this session's dispatcher.
    pub fn send(&mut self, message: Message) -> Result<()> {
        self.dispatcher.send(&mut self.state, message)
    }

    /// Print the welcome banner and the starting location.
    pub fn welcome(&mut self) {
        let banner = format!(" | Currently you're in the world of: {}! |", self.world_name);
        let rule = format!(" {}", "-".repeat(banner.len() - 1));
        self.say("-- Welcome Player!! --");
        self.say("");
        self.say(rule.clone());
        self.say(banner);
        self.say(rule);
        self.display_location();
    }

    /// Handle one line of player input.
    ///
    /// Player death ends the session with [`SessionStatus::PlayerDied`] rather
    /// than an error. Other errors leave the session running.
    pub fn process_input(&mut self, input: &str) -> Result<SessionStatus> {
        if !self.is_running() {
            return Ok(self.status);
        }

        let input = input.trim();
        let (command, args) = input
            .split_once(char::is_whitespace)
            .map(|(command, args)| (command, args.trim()))
            .unwrap_or((input, ""));
        if command.is_empty() {
            return Ok(self.status);
        }
        let command = command.to_lowercase();

        // `look in X` is its own command; every other form of look goes to `look`.
        let (command, args) = if command == "look" && starts_with_word(args, "in") {
            ("look in".to_string(), args[2..].trim())
        } else {
            (command, args)
        };

        let result = match self.commands.resolve(&command) {
            Some(verb) => commands::execute(self, verb, args),
            None => {
                self.say("Invalid command.");
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(self.status),
            Err(GameError::PlayerDied) => {
                self.status = SessionStatus::PlayerDied;
                Ok(self.status)
            }
            Err(e) => {
                error!(%e, input, "command failed");
                Err(e)
            }
        }
    }

    pub(crate) fn quit(&mut self) {
        self.status = SessionStatus::Quit;
    }

    pub fn current_location(&self) -> LocationId {
        self.state.player.location()
    }

    /// An entity by name at the player's location, then in the inventory.
    pub fn find_nearby(&self, name: &str) -> Option<EntityId> {
        self.state
            .world
            .find_in_location(self.current_location(), name)
            .or_else(|| self.find_carried(name))
    }

    /// A carried entity by name.
    pub fn find_carried(&self, name: &str) -> Option<EntityId> {
        self.state.player.find_in_inventory(&self.state.world, name)
    }

    /// Dispatcher identity of an entity.
    pub fn identity_of(&self, entity: EntityId) -> Option<RecipientId> {
        self.state
            .world
            .entity(entity)
            .map(|e| RecipientId::new(e.identity.as_str()))
    }

    /// Name, description and visible items of the player's location.
    pub fn display_location(&mut self) {
        let world = &self.state.world;
        let Some(location) = world.location(self.state.player.location()) else {
            return;
        };
        let names = world.names_of(&location.entities);
        let items = if names.is_empty() {
            "There are no items here.".to_string()
        } else {
            format!("You notice {}.", names.join(", "))
        };
        let lines = [
            String::new(),
            location.name.clone(),
            location.description.clone(),
            items,
            String::new(),
        ];
        for line in lines {
            self.say(line);
        }
    }

    pub fn view_inventory(&mut self) {
        let names: Vec<String> = self
            .state
            .world
            .names_of(self.state.player.inventory())
            .into_iter()
            .map(str::to_string)
            .collect();

        self.say("");
        self.say("----- Inventory -----");
        if names.is_empty() {
            self.say("Your inventory is empty.");
        } else {
            for name in names {
                self.say(format!("- {name}"));
            }
        }
        self.say("---------------------");
    }

    /// Every location with its exits and entities, one container level deep.
    pub fn debug_tree(&mut self) {
        let world = &self.state.world;
        let here = self.state.player.location();
        let mut lines = vec![String::new(), "--- Game World Debug Tree ---".to_string()];

        for location in world.locations() {
            lines.push(String::new());
            lines.push(format!("Location ID: {}", location.id));
            lines.push(format!("Name: {}", location.name));
            lines.push(format!("Description: {}", location.description));
            if location.id == here {
                lines.push(" -----------------".to_string());
                lines.push(" | You are here |".to_string());
                lines.push(" -----------------".to_string());
            }

            lines.push("Connections:".to_string());
            for (direction, target) in &location.connections {
                let target_name = world
                    .location(*target)
                    .map(|l| l.name.as_str())
                    .unwrap_or("Unknown Location");
                lines.push(format!(" - {direction} (to location {target} - {target_name})"));
            }

            lines.push("Entities:".to_string());
            for entity in location.entities.iter().filter_map(|id| world.entity(*id)) {
                lines.push(format!(" - {}: {}", entity.name, entity.description));
                if !entity.contents().is_empty() {
                    lines.push("   Contains:".to_string());
                    for item in entity.contents().iter().filter_map(|id| world.entity(*id)) {
                        lines.push(format!("   - {}: {}", item.name, item.description));
                    }
                }
            }
            lines.push("--------------------------".to_string());
        }
        lines.push(String::new());
        lines.push("--- End of Debug Tree ---".to_string());

        for line in lines {
            self.say(line);
        }
    }

    /// JSON snapshot of the world, for tooling.
    pub fn debug_json(&self) -> serde_json::Value {
        serde_json::json!({
            "world_name": self.world_name,
            "player": {
                "location": self.state.player.location(),
                "health": self.state.player.health(),
                "inventory": self.state.player.inventory(),
            },
            "world": serde_json::to_value(&self.state.world).unwrap_or_default(),
        })
    }
}

fn starts_with_word(text: &str, word: &str) -> bool {
    match (text.get(..word.len()), text.get(word.len()..)) {
        (Some(head), Some(rest)) => {
            head.eq_ignore_ascii_case(word) && rest.starts_with(char::is_whitespace)
        }
        _ => false,
    }
}
