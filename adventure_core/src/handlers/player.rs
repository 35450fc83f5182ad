//! Messages addressed to `"player"`.

use tracing::debug;

use super::GameState;
use crate::error::Result;
use crate::messaging::{Message, MessageKind};

pub(super) fn handle(state: &mut GameState, message: &Message) -> Result<()> {
    debug!(from = %message.from, kind = message.tag(), "player received message");

    match &message.kind {
        MessageKind::Heal(amount) => state.player.modify_health(*amount, &mut state.transcript),
        MessageKind::Damage(amount) => state
            .player
            .take_damage(amount.saturating_abs(), &mut state.transcript),
        MessageKind::AddItem(item) => {
            state.player.add_item(*item);
            if let Some(entity) = state.world.entity(*item) {
                state.transcript.say(format!("You received {}.", entity.name));
            }
            Ok(())
        }
        MessageKind::RemoveItem(item) => {
            state.player.remove_item(*item);
            if let Some(entity) = state.world.entity(*item) {
                state.transcript.say(format!("You lost {}.", entity.name));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
