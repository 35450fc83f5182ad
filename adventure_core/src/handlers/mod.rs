//! Message handlers for the three kinds of recipient.
//!
//! [`GameState`] owns everything a handler may mutate and implements
//! [`MessageHandler`] by matching the delivery route:
//! - **entity**: capability-driven behaviour of items and containers
//! - **location**: picking up top-level items by name
//! - **player**: health and inventory

mod entity;
mod location;
mod player;

use game_rules::World;

use crate::error::Result;
use crate::messaging::{Dispatcher, Message, MessageHandler, Route};
use crate::player::Player;
use crate::transcript::Transcript;

/// All mutable game state of a session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub player: Player,
    pub transcript: Transcript,
}

impl GameState {
    pub fn new(world: World, player: Player) -> Self {
        Self {
            world,
            player,
            transcript: Transcript::new(),
        }
    }
}

impl MessageHandler for GameState {
    fn handle(
        &mut self,
        dispatcher: &mut Dispatcher,
        route: Route,
        message: &Message,
    ) -> Result<()> {
        match route {
            Route::Entity(id) => entity::handle(self, dispatcher, id, message),
            Route::Location(id) => location::handle(self, dispatcher, id, message),
            Route::Player => player::handle(self, message),
        }
    }
}
