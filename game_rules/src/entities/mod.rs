//! Entity definitions for the game world.

mod components;
mod entity;

pub use components::*;
pub use entity::*;

use serde::{Deserialize, Serialize};

/// Handle of an entity in the world arena.
///
/// Handles are stable for the lifetime of a world: entities are never removed,
/// only moved between lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Position of the entity in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
