//! Creating entities and locations together with their dispatcher identities.

use std::time::{SystemTime, UNIX_EPOCH};

use game_rules::{EntityBlueprint, EntityId, Location, LocationId, World};
use tracing::debug;
use uuid::Uuid;

use crate::messaging::{Dispatcher, RecipientId, Route};

/// Spawn an entity into the arena and register it under a fresh identity.
///
/// The first candidate is `<name>_<unix-seconds>`. Entities created in the same
/// second collide, so retries append a random token until one is free.
pub fn spawn_entity(
    world: &mut World,
    dispatcher: &mut Dispatcher,
    blueprint: EntityBlueprint,
) -> EntityId {
    let id = world.next_entity_id();
    let stamp = unix_seconds();

    let mut identity = format!("{}_{}", blueprint.name, stamp);
    while !dispatcher.register(identity.as_str(), Route::Entity(id)) {
        let token = Uuid::new_v4().simple().to_string();
        identity = format!("{}_{}_{}", blueprint.name, stamp, &token[..8]);
    }

    debug!(entity = %id, %identity, name = %blueprint.name, "spawned entity");
    world.spawn(identity, blueprint)
}

/// Add a location to the world and register it as `location_<id>`.
///
/// Returns false if the identity was already taken, which happens when a world
/// file declares the same id twice. The location itself still replaces the
/// earlier one.
pub fn add_location(world: &mut World, dispatcher: &mut Dispatcher, location: Location) -> bool {
    let id: LocationId = location.id;
    world.add_location(location);
    dispatcher.register(RecipientId::location(id), Route::Location(id))
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_gets_distinct_identities() {
        let mut world = World::new();
        let mut dispatcher = Dispatcher::new();

        let a = spawn_entity(&mut world, &mut dispatcher, EntityBlueprint::new("coin", "Gold"));
        let b = spawn_entity(&mut world, &mut dispatcher, EntityBlueprint::new("coin", "Gold"));
        let c = spawn_entity(&mut world, &mut dispatcher, EntityBlueprint::new("coin", "Gold"));

        let ids: Vec<_> = [a, b, c]
            .iter()
            .map(|id| world.entity(*id).unwrap().identity.clone())
            .collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
        assert!(ids.iter().all(|i| i.starts_with("coin_")));

        for (id, identity) in [a, b, c].iter().zip(&ids) {
            assert_eq!(
                dispatcher.route(&RecipientId::new(identity.as_str())),
                Some(Route::Entity(*id))
            );
        }
    }

    #[test]
    fn test_location_registration() {
        let mut world = World::new();
        let mut dispatcher = Dispatcher::new();

        assert!(add_location(
            &mut world,
            &mut dispatcher,
            Location::new(LocationId(4), "Attic", "Dusty")
        ));
        assert!(!add_location(
            &mut world,
            &mut dispatcher,
            Location::new(LocationId(4), "Attic", "Still dusty")
        ));

        assert_eq!(
            dispatcher.route(&RecipientId::new("location_4")),
            Some(Route::Location(LocationId(4)))
        );
        assert_eq!(world.location(LocationId(4)).unwrap().description, "Still dusty");
    }
}
