//! Messages addressed to `location_<id>`.

use game_rules::LocationId;
use tracing::debug;

use super::GameState;
use crate::error::Result;
use crate::messaging::{Dispatcher, Message, MessageKind, RecipientId};

pub(super) fn handle(
    state: &mut GameState,
    dispatcher: &mut Dispatcher,
    location: LocationId,
    message: &Message,
) -> Result<()> {
    debug!(%location, from = %message.from, kind = message.tag(), "location received message");

    match &message.kind {
        MessageKind::TakeNamed(name) => take_named(state, dispatcher, location, name),
        _ => Ok(()),
    }
}

/// Hand a takeable top-level item to the player.
fn take_named(
    state: &mut GameState,
    dispatcher: &mut Dispatcher,
    location: LocationId,
    name: &str,
) -> Result<()> {
    let item = state
        .world
        .find_in_location(location, name)
        .filter(|id| state.world.entity(*id).is_some_and(|e| e.is_takeable()));

    let Some(item) = item else {
        state.transcript.say(format!("You can't take the {name}."));
        return Ok(());
    };

    // The location keeps the item until the player has accepted it.
    dispatcher.send(
        state,
        Message::new(
            RecipientId::location(location),
            RecipientId::player(),
            MessageKind::AddItem(item),
        ),
    )?;
    state.world.remove_from_location(location, item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::messaging::Route;
    use crate::player::Player;
    use game_rules::{Components, EntityBlueprint, EntityId, HealthPool, Location, World};

    const HALL: LocationId = LocationId(1);

    fn hall_with_lamp(max_depth: usize) -> (GameState, Dispatcher, EntityId) {
        let mut world = World::new();
        world.add_location(Location::new(HALL, "Hall", "A hall"));
        let lamp = world.spawn(
            "lamp_1",
            EntityBlueprint::new("lamp", "A brass lamp")
                .with_components(Components::new().with_takeable()),
        );
        world.place_in_location(HALL, lamp);

        let mut dispatcher = Dispatcher::with_max_depth(max_depth);
        dispatcher.register(RecipientId::player(), Route::Player);
        dispatcher.register(RecipientId::location(HALL), Route::Location(HALL));
        let state = GameState::new(world, Player::new(HALL, HealthPool::default()));
        (state, dispatcher, lamp)
    }

    fn take(state: &mut GameState, dispatcher: &mut Dispatcher, name: &str) -> Result<()> {
        let message = Message::from_player(
            RecipientId::location(HALL),
            MessageKind::TakeNamed(name.into()),
        );
        dispatcher.send(state, message)
    }

    #[test]
    fn test_take_named_moves_item_to_player() {
        let (mut state, mut dispatcher, lamp) = hall_with_lamp(8);

        take(&mut state, &mut dispatcher, "LAMP").unwrap();

        assert_eq!(state.player.inventory(), &[lamp]);
        assert!(state.world.location(HALL).unwrap().entities.is_empty());
        assert_eq!(state.transcript.lines(), &["You received lamp."]);
    }

    #[test]
    fn test_refused_handoff_keeps_item_in_place() {
        let (mut state, mut dispatcher, lamp) = hall_with_lamp(1);

        let result = take(&mut state, &mut dispatcher, "lamp");

        assert!(matches!(
            result,
            Err(GameError::DispatchDepthExceeded { limit: 1, tag: "addItem" })
        ));
        assert_eq!(state.world.location(HALL).unwrap().entities, vec![lamp]);
        assert!(state.player.inventory().is_empty());
    }
}
