//! Component definitions for entities.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::mechanics::UseEffect;

/// Hit points of a generic entity. Unlike the player's pool this is not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthComponent {
    pub value: i32,
}

impl HealthComponent {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

/// A lock that needs a named key. Starts locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockableComponent {
    pub key: String,
    pub locked: bool,
}

impl LockableComponent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Unlock if `key_used` matches exactly (case-sensitive). Returns whether the
    /// lock is open afterwards.
    pub fn unlock(&mut self, key_used: &str) -> bool {
        if key_used == self.key {
            self.locked = false;
        }
        !self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }
}

/// Holds other entities by handle, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContainerComponent {
    contents: Vec<EntityId>,
}

impl ContainerComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. An item already present is not added twice.
    pub fn add_item(&mut self, item: EntityId) -> bool {
        if self.contents.contains(&item) {
            return false;
        }
        self.contents.push(item);
        true
    }

    /// Remove an item, keeping the order of the rest.
    pub fn remove_item(&mut self, item: EntityId) -> bool {
        let before = self.contents.len();
        self.contents.retain(|id| *id != item);
        self.contents.len() != before
    }

    pub fn contents(&self) -> &[EntityId] {
        &self.contents
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.contents.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OpenableComponent {
    pub open: bool,
}

impl OpenableComponent {
    pub fn new(initially_open: bool) -> Self {
        Self {
            open: initially_open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self) {
        self.open = true;
    }

    pub fn set_closed(&mut self) {
        self.open = false;
    }
}

/// Effect applied to the player when the item is used. Stateless after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UsableComponent {
    pub effect: UseEffect,
    pub magnitude: i32,
}

impl UsableComponent {
    pub fn new(effect: UseEffect, magnitude: i32) -> Self {
        Self { effect, magnitude }
    }

    /// A usable item whose effect is derived from a signed health delta.
    pub fn from_health_delta(delta: i32) -> Self {
        Self::new(UseEffect::from_health_delta(delta), delta)
    }
}

/// Marker: the entity can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TakeableComponent;

/// The full capability set of one entity. Each kind is present at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Components {
    pub health: Option<HealthComponent>,
    pub lockable: Option<LockableComponent>,
    pub container: Option<ContainerComponent>,
    pub openable: Option<OpenableComponent>,
    pub usable: Option<UsableComponent>,
    pub takeable: Option<TakeableComponent>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(mut self, value: i32) -> Self {
        self.health = Some(HealthComponent::new(value));
        self
    }

    pub fn with_lock(mut self, key: impl Into<String>) -> Self {
        self.lockable = Some(LockableComponent::new(key));
        self
    }

    pub fn with_container(mut self) -> Self {
        self.container = Some(ContainerComponent::new());
        self
    }

    pub fn with_openable(mut self, initially_open: bool) -> Self {
        self.openable = Some(OpenableComponent::new(initially_open));
        self
    }

    pub fn with_usable(mut self, usable: UsableComponent) -> Self {
        self.usable = Some(usable);
        self
    }

    pub fn with_takeable(mut self) -> Self {
        self.takeable = Some(TakeableComponent);
        self
    }

    /// True when a lock is present and engaged.
    pub fn is_locked(&self) -> bool {
        self.lockable.as_ref().is_some_and(LockableComponent::is_locked)
    }

    /// True when an openable is present and shut.
    pub fn is_closed(&self) -> bool {
        self.openable.is_some_and(|o| !o.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_requires_exact_key() {
        let mut lock = LockableComponent::new("brass");
        assert!(lock.is_locked());

        assert!(!lock.unlock("Brass"));
        assert!(!lock.unlock("iron"));
        assert!(lock.is_locked());

        assert!(lock.unlock("brass"));
        assert!(!lock.is_locked());

        lock.lock();
        assert!(lock.is_locked());
    }

    #[test]
    fn test_container_keeps_order_without_duplicates() {
        let mut container = ContainerComponent::new();
        let (a, b, c) = (EntityId(0), EntityId(1), EntityId(2));

        assert!(container.add_item(a));
        assert!(container.add_item(b));
        assert!(container.add_item(c));
        assert!(!container.add_item(b));
        assert_eq!(container.contents(), &[a, b, c]);

        assert!(container.remove_item(b));
        assert!(!container.remove_item(b));
        assert_eq!(container.contents(), &[a, c]);
    }

    #[test]
    fn test_openable_defaults_closed() {
        let mut openable = OpenableComponent::default();
        assert!(!openable.is_open());
        openable.set_open();
        assert!(openable.is_open());
        openable.set_closed();
        assert!(!openable.is_open());
    }

    #[test]
    fn test_components_builder() {
        let components = Components::new()
            .with_container()
            .with_openable(false)
            .with_lock("brass");

        assert!(components.container.is_some());
        assert!(components.takeable.is_none());
        assert!(components.health.is_none());
        assert!(components.is_locked());
        assert!(components.is_closed());
    }

    #[test]
    fn test_usable_from_delta() {
        let potion = UsableComponent::from_health_delta(2);
        assert_eq!(potion.effect, UseEffect::Heal);
        assert_eq!(potion.magnitude, 2);

        let poison = UsableComponent::from_health_delta(-3);
        assert_eq!(poison.effect, UseEffect::Damage);
    }

    #[test]
    fn test_entity_health_is_unclamped() {
        let components = Components::new().with_health(40);
        assert_eq!(components.health, Some(HealthComponent::new(40)));
        assert_eq!(Components::new().with_health(-5).health.map(|h| h.value), Some(-5));
    }
}
