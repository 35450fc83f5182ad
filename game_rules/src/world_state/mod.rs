//! World state management - the arena holding every entity and location.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{Entity, EntityBlueprint, EntityId};

/// Author-assigned location number from the world file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    /// Direction label -> neighbouring location.
    pub connections: BTreeMap<String, LocationId>,
    /// Top-level entities only. Items inside containers live in the container.
    pub entities: Vec<EntityId>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            connections: BTreeMap::new(),
            entities: Vec::new(),
        }
    }

    /// Add or replace the connection in `direction`.
    pub fn add_connection(&mut self, direction: impl Into<String>, target: LocationId) {
        self.connections.insert(direction.into(), target);
    }

    /// Target of an exact direction label.
    pub fn exit(&self, direction: &str) -> Option<LocationId> {
        self.connections.get(direction).copied()
    }

    pub fn add_entity(&mut self, entity: EntityId) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    pub fn remove_entity(&mut self, entity: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|id| *id != entity);
        self.entities.len() != before
    }
}

/// The complete state of the game world: an entity arena plus the location graph.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct World {
    /// Indexed by `EntityId`.
    entities: Vec<Entity>,

    locations: BTreeMap<LocationId, Location>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the next spawned entity will receive.
    pub fn next_entity_id(&self) -> EntityId {
        EntityId(self.entities.len() as u32)
    }

    /// Move a blueprint into the arena under the given dispatcher identity.
    ///
    /// The new entity is not placed anywhere; callers put its handle into a
    /// location, a container or an inventory.
    pub fn spawn(&mut self, identity: impl Into<String>, blueprint: EntityBlueprint) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            identity: identity.into(),
            name: blueprint.name,
            description: blueprint.description,
            components: blueprint.components,
        });
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Add a location to the world, replacing any with the same id.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        let id = location.id;
        self.locations.insert(id, location);
        id
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(&id)
    }

    /// All locations, ordered by id.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Wire `from --direction--> to`. Returns false if either end is unknown.
    pub fn connect(&mut self, from: LocationId, direction: &str, to: LocationId) -> bool {
        if !self.locations.contains_key(&to) {
            return false;
        }
        match self.locations.get_mut(&from) {
            Some(location) => {
                location.add_connection(direction, to);
                true
            }
            None => false,
        }
    }

    /// First entity among `ids` whose display name matches, ignoring case.
    pub fn find_by_name(&self, ids: &[EntityId], name: &str) -> Option<EntityId> {
        ids.iter()
            .copied()
            .find(|id| self.entity(*id).is_some_and(|e| e.is_named(name)))
    }

    /// First top-level entity at a location with the given name.
    pub fn find_in_location(&self, location: LocationId, name: &str) -> Option<EntityId> {
        self.location(location)
            .and_then(|loc| self.find_by_name(&loc.entities, name))
    }

    /// Display names of the given entities, in order.
    pub fn names_of(&self, ids: &[EntityId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.entity(*id))
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn place_in_location(&mut self, location: LocationId, entity: EntityId) -> bool {
        match self.locations.get_mut(&location) {
            Some(loc) => {
                loc.add_entity(entity);
                true
            }
            None => false,
        }
    }

    pub fn remove_from_location(&mut self, location: LocationId, entity: EntityId) -> bool {
        self.locations
            .get_mut(&location)
            .is_some_and(|loc| loc.remove_entity(entity))
    }

    /// Put `item` into `container`'s contents. False if `container` has no
    /// container component or the item is already inside.
    pub fn add_to_container(&mut self, container: EntityId, item: EntityId) -> bool {
        self.entity_mut(container)
            .and_then(|e| e.components.container.as_mut())
            .is_some_and(|c| c.add_item(item))
    }

    pub fn remove_from_container(&mut self, container: EntityId, item: EntityId) -> bool {
        self.entity_mut(container)
            .and_then(|e| e.components.container.as_mut())
            .is_some_and(|c| c.remove_item(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Components;

    fn two_rooms() -> World {
        let mut world = World::new();
        world.add_location(Location::new(LocationId(1), "Hall", "A hall"));
        world.add_location(Location::new(LocationId(2), "Cellar", "A dark cellar"));
        world
    }

    #[test]
    fn test_spawn_assigns_sequential_handles() {
        let mut world = World::new();
        assert_eq!(world.next_entity_id(), EntityId(0));

        let a = world.spawn("torch_1", EntityBlueprint::new("torch", "A lit torch"));
        let b = world.spawn("rope_1", EntityBlueprint::new("rope", "Some rope"));

        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(world.entity(b).unwrap().identity, "rope_1");
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_connect_requires_both_ends() {
        let mut world = two_rooms();

        assert!(world.connect(LocationId(1), "north", LocationId(2)));
        assert!(!world.connect(LocationId(1), "east", LocationId(9)));
        assert!(!world.connect(LocationId(9), "west", LocationId(1)));

        let hall = world.location(LocationId(1)).unwrap();
        assert_eq!(hall.exit("north"), Some(LocationId(2)));
        assert_eq!(hall.exit("east"), None);
    }

    #[test]
    fn test_find_in_location_first_match() {
        let mut world = two_rooms();
        let first = world.spawn("coin_1", EntityBlueprint::new("Coin", "Gold"));
        let second = world.spawn("coin_2", EntityBlueprint::new("coin", "Silver"));
        world.place_in_location(LocationId(1), first);
        world.place_in_location(LocationId(1), second);

        assert_eq!(world.find_in_location(LocationId(1), "COIN"), Some(first));
        assert_eq!(world.find_in_location(LocationId(2), "coin"), None);
        assert_eq!(world.names_of(&[first, second]), vec!["Coin", "coin"]);
    }

    #[test]
    fn test_move_between_location_and_container() {
        let mut world = two_rooms();
        let chest = world.spawn(
            "chest_1",
            EntityBlueprint::new("chest", "A chest")
                .with_components(Components::new().with_container()),
        );
        let gem = world.spawn("gem_1", EntityBlueprint::new("gem", "A gem"));
        world.place_in_location(LocationId(1), chest);
        world.place_in_location(LocationId(1), gem);

        assert!(world.remove_from_location(LocationId(1), gem));
        assert!(world.add_to_container(chest, gem));
        assert!(!world.add_to_container(chest, gem));
        assert!(!world.add_to_container(gem, chest));

        assert_eq!(world.location(LocationId(1)).unwrap().entities, vec![chest]);
        assert_eq!(world.entity(chest).unwrap().contents(), &[gem]);

        assert!(world.remove_from_container(chest, gem));
        assert!(world.entity(chest).unwrap().contents().is_empty());
    }

    #[test]
    fn test_world_serializes() {
        let world = two_rooms();
        let json = serde_json::to_value(&world).unwrap();
        assert!(json["locations"].is_object());
    }
}
