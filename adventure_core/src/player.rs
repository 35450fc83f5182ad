//! The player: position, inventory and health.

use game_rules::{EntityId, HealthPool, LocationId, Vitality, World};
use tracing::info;

use crate::error::{GameError, Result};
use crate::transcript::Transcript;

/// The single player of a session, addressed as `"player"` on the dispatcher.
#[derive(Debug, Clone)]
pub struct Player {
    location: LocationId,
    inventory: Vec<EntityId>,
    health: HealthPool,
}

impl Player {
    pub fn new(start: LocationId, health: HealthPool) -> Self {
        Self {
            location: start,
            inventory: Vec::new(),
            health,
        }
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn health(&self) -> i32 {
        self.health.current
    }

    pub fn inventory(&self) -> &[EntityId] {
        &self.inventory
    }

    pub fn has_item(&self, item: EntityId) -> bool {
        self.inventory.contains(&item)
    }

    /// Add by handle. An item already carried is not added twice.
    pub fn add_item(&mut self, item: EntityId) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    pub fn remove_item(&mut self, item: EntityId) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|id| *id != item);
        self.inventory.len() != before
    }

    /// First carried item with the given display name, ignoring case.
    pub fn find_in_inventory(&self, world: &World, name: &str) -> Option<EntityId> {
        world.find_by_name(&self.inventory, name)
    }

    /// Follow the exit labelled `direction` from the current location.
    pub fn go(&mut self, world: &World, direction: &str, out: &mut Transcript) -> bool {
        let target = world
            .location(self.location)
            .and_then(|loc| loc.exit(direction));

        match target {
            Some(target) => {
                self.location = target;
                out.blank();
                out.say(format!("You move {direction}."));
                true
            }
            None => {
                out.blank();
                out.say("No path in that direction.");
                false
            }
        }
    }

    /// Adjust health by a signed amount. Negative amounts are damage.
    pub fn modify_health(&mut self, amount: i32, out: &mut Transcript) -> Result<()> {
        if amount < 0 {
            return self.take_damage(amount.saturating_neg(), out);
        }
        let health = self.health.heal(amount);
        out.say(format!("Your health is now: {health}"));
        Ok(())
    }

    /// Lose `amount` health. Reaching zero ends the game with
    /// [`GameError::PlayerDied`].
    pub fn take_damage(&mut self, amount: i32, out: &mut Transcript) -> Result<()> {
        let vitality = self.health.damage(amount);
        out.say(format!(
            "You took {amount} damage. Your health is now: {}",
            self.health.current
        ));

        if vitality == Vitality::Dead {
            out.say("You lose! Game over.");
            info!("player died");
            return Err(GameError::PlayerDied);
        }
        Ok(())
    }
}
