//! Messages addressed to an entity.
//!
//! Behaviour depends only on which components the entity carries. Lock and
//! open checks always run before the requested action.

use game_rules::{Entity, EntityId, UseEffect};
use tracing::{debug, warn};

use super::GameState;
use crate::error::Result;
use crate::messaging::{Dispatcher, Message, MessageKind, RecipientId};

pub(super) fn handle(
    state: &mut GameState,
    dispatcher: &mut Dispatcher,
    id: EntityId,
    message: &Message,
) -> Result<()> {
    let Some(entity) = state.world.entity(id) else {
        warn!(entity = %id, kind = message.tag(), "route points at a missing entity");
        return Ok(());
    };
    debug!(
        entity = %entity.identity,
        from = %message.from,
        kind = message.tag(),
        "entity received message"
    );

    match &message.kind {
        MessageKind::Inspect => {
            let line = format!("The {} is inspected: {}", entity.name, entity.description);
            state.transcript.say(line);
            Ok(())
        }
        MessageKind::Use { target: None } => use_on_player(state, dispatcher, id),
        MessageKind::Use {
            target: Some(target),
        } => {
            debug!(entity = %entity.identity, %target, "targeted use has no effect");
            Ok(())
        }
        MessageKind::Unlock(key) => {
            unlock(state, id, key);
            Ok(())
        }
        MessageKind::Open => {
            set_open(state, id, true);
            Ok(())
        }
        MessageKind::Close => {
            set_open(state, id, false);
            Ok(())
        }
        MessageKind::AddItem(item) => {
            if state.world.add_to_container(id, *item) {
                let line = format!("Item added to {}.", entity_name(state, id));
                state.transcript.say(line);
            }
            Ok(())
        }
        MessageKind::RemoveItem(item) => {
            if state.world.remove_from_container(id, *item) {
                let line = format!("Item removed from {}.", entity_name(state, id));
                state.transcript.say(line);
            }
            Ok(())
        }
        MessageKind::LookIn => {
            look_in(state, id);
            Ok(())
        }
        MessageKind::TakeFrom(item_name) => take_from(state, dispatcher, id, item_name),
        MessageKind::PutItem(item) => put_item(state, dispatcher, id, *item),
        MessageKind::TakeNamed(_) | MessageKind::Heal(_) | MessageKind::Damage(_) => Ok(()),
    }
}

fn entity_name(state: &GameState, id: EntityId) -> String {
    state
        .world
        .entity(id)
        .map(|e| e.name.clone())
        .unwrap_or_default()
}

fn identity_of(state: &GameState, id: EntityId) -> RecipientId {
    state
        .world
        .entity(id)
        .map(|e| RecipientId::new(e.identity.as_str()))
        .unwrap_or_else(|| RecipientId::new(id.to_string()))
}

/// Why a container refuses access, if it does.
fn access_refusal(entity: &Entity) -> Option<String> {
    if entity.components.is_locked() {
        Some(format!("{} is locked.", entity.name))
    } else if entity.components.is_closed() {
        Some(format!("The {} is closed.", entity.name))
    } else {
        None
    }
}

/// Apply the use effect to the player, then leave the player's inventory.
fn use_on_player(state: &mut GameState, dispatcher: &mut Dispatcher, id: EntityId) -> Result<()> {
    let Some(entity) = state.world.entity(id) else {
        return Ok(());
    };
    let name = entity.name.clone();
    let Some(usable) = entity.components.usable else {
        state.transcript.say(format!("You can't use {name}."));
        return Ok(());
    };
    let me = identity_of(state, id);

    match usable.effect {
        UseEffect::Heal => {
            state
                .transcript
                .say(format!("You feel rejuvenated after using the {name}."));
            dispatcher.send(
                state,
                Message::new(me.clone(), RecipientId::player(), MessageKind::Heal(usable.magnitude)),
            )?;
        }
        UseEffect::Damage => {
            state
                .transcript
                .say(format!("You feel a burning sensation as you consume the {name}."));
            dispatcher.send(
                state,
                Message::new(
                    me.clone(),
                    RecipientId::player(),
                    MessageKind::Damage(usable.magnitude.saturating_abs()),
                ),
            )?;
        }
        UseEffect::None => {}
    }

    dispatcher.send(
        state,
        Message::new(me, RecipientId::player(), MessageKind::RemoveItem(id)),
    )
}

fn unlock(state: &mut GameState, id: EntityId, key: &str) {
    let Some(entity) = state.world.entity_mut(id) else {
        return;
    };
    let Some(lock) = entity.components.lockable.as_mut() else {
        return;
    };
    if lock.unlock(key) {
        let line = format!("{} has been unlocked.", entity.name);
        state.transcript.say(line);
    } else {
        debug!(entity = %entity.identity, "wrong key");
    }
}

fn set_open(state: &mut GameState, id: EntityId, open: bool) {
    let Some(entity) = state.world.entity_mut(id) else {
        return;
    };
    let Some(openable) = entity.components.openable.as_mut() else {
        return;
    };

    let line = match (open, openable.is_open()) {
        (true, false) => {
            openable.set_open();
            format!("{} is now open.", entity.name)
        }
        (true, true) => format!("{} is already open.", entity.name),
        (false, true) => {
            openable.set_closed();
            format!("{} is now closed.", entity.name)
        }
        (false, false) => format!("{} is already closed.", entity.name),
    };
    state.transcript.say(line);
}

fn look_in(state: &mut GameState, id: EntityId) {
    let Some(entity) = state.world.entity(id) else {
        return;
    };
    if !entity.is_container() {
        let line = format!("You can't look inside {}.", entity.name);
        state.transcript.say(line);
        return;
    }
    if entity.components.is_closed() {
        let line = format!("{} is closed.", entity.name);
        state.transcript.say(line);
        return;
    }

    let mut lines = Vec::new();
    if entity.contents().is_empty() {
        lines.push(format!("The {} is empty.", entity.name));
    } else {
        lines.push(format!("Inside the {} you find:", entity.name));
        for item in entity.contents().iter().filter_map(|i| state.world.entity(*i)) {
            lines.push(format!(" - {}: {}", item.name, item.description));
        }
    }
    for line in lines {
        state.transcript.say(line);
    }
}

fn take_from(
    state: &mut GameState,
    dispatcher: &mut Dispatcher,
    id: EntityId,
    item_name: &str,
) -> Result<()> {
    let Some(entity) = state.world.entity(id) else {
        return Ok(());
    };
    if !entity.is_container() {
        let line = format!("{} is not a container.", entity.name);
        state.transcript.say(line);
        return Ok(());
    }
    if let Some(refusal) = access_refusal(entity) {
        state.transcript.say(refusal);
        return Ok(());
    }

    let container_name = entity.name.clone();
    let Some(item) = state.world.find_by_name(entity.contents(), item_name) else {
        state
            .transcript
            .say(format!("You don't see a {item_name} in there."));
        return Ok(());
    };
    let Some(found) = state.world.entity(item) else {
        return Ok(());
    };
    if !found.is_takeable() {
        state.transcript.say("You can't take that.");
        return Ok(());
    }
    let found_name = found.name.clone();

    let handoff = Message::new(identity_of(state, id), RecipientId::player(), MessageKind::AddItem(item));
    dispatcher.send(state, handoff)?;
    state.world.remove_from_container(id, item);
    state
        .transcript
        .say(format!("Taken {found_name} from {container_name}."));
    Ok(())
}

fn put_item(
    state: &mut GameState,
    dispatcher: &mut Dispatcher,
    id: EntityId,
    item: EntityId,
) -> Result<()> {
    let Some(entity) = state.world.entity(id) else {
        return Ok(());
    };
    if !entity.is_container() {
        let line = format!("The {} is not a container.", entity.name);
        state.transcript.say(line);
        return Ok(());
    }
    if let Some(refusal) = access_refusal(entity) {
        state.transcript.say(refusal);
        return Ok(());
    }
    let container_name = entity.name.clone();
    if item == id {
        state
            .transcript
            .say(format!("You can't put the {container_name} inside itself."));
        return Ok(());
    }
    let item_name = entity_name(state, item);

    let handoff = Message::new(
        identity_of(state, id),
        RecipientId::player(),
        MessageKind::RemoveItem(item),
    );
    dispatcher.send(state, handoff)?;
    state.world.add_to_container(id, item);
    state
        .transcript
        .say(format!("You put the {item_name} in the {container_name}."));
    Ok(())
}
