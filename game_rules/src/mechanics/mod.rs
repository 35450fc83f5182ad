//! Game mechanics: use effects and health rules.

use serde::{Deserialize, Serialize};

/// Health ceiling for the player.
pub const PLAYER_MAX_HEALTH: i32 = 5;

/// What happens to the player when an item is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UseEffect {
    /// Using the item has no effect on the player.
    #[default]
    None,
    Heal,
    Damage,
}

impl UseEffect {
    /// Derive an effect from a signed health delta.
    ///
    /// Positive values heal; zero and negative values damage.
    pub fn from_health_delta(delta: i32) -> Self {
        if delta > 0 {
            UseEffect::Heal
        } else {
            UseEffect::Damage
        }
    }
}

/// Result of applying damage to a health pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Dead,
}

/// A clamped health pool: never above `max`, never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPool {
    pub current: i32,
    pub max: i32,
}

impl Default for HealthPool {
    fn default() -> Self {
        Self::new(PLAYER_MAX_HEALTH, PLAYER_MAX_HEALTH)
    }
}

impl HealthPool {
    /// Create a pool, clamping the starting value into `0..=max`.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Add `amount`, capped at the ceiling. Returns the new value.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current
    }

    /// Subtract `amount`, floored at zero.
    pub fn damage(&mut self, amount: i32) -> Vitality {
        self.current = self.current.saturating_sub(amount).max(0);
        if self.current == 0 {
            Vitality::Dead
        } else {
            Vitality::Alive
        }
    }
}
