//! Messaging - the typed message model and the synchronous dispatcher.
//!
//! Every interaction between the player, locations and entities is a
//! [`Message`] routed by unique string identity:
//! - **Player**: always `"player"`
//! - **Locations**: `"location_<id>"`
//! - **Entities**: a runtime-generated identity unique per entity

mod dispatcher;

pub use dispatcher::*;

use game_rules::{EntityId, LocationId};
use serde::{Deserialize, Serialize};

/// Dispatcher identity of a message sender or recipient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipientId(String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fixed identity of the player.
    pub fn player() -> Self {
        Self::new("player")
    }

    /// Identity of a location: `location_<id>`.
    pub fn location(id: LocationId) -> Self {
        Self(format!("location_{}", id.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecipientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a message asks the recipient to do, with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Describe yourself.
    Inspect,

    /// List your contents.
    LookIn,

    /// Apply your use effect. `target` is reserved for item-on-item use and
    /// currently has no handler.
    Use { target: Option<String> },

    /// Try to unlock with the named key.
    Unlock(String),

    Open,
    Close,

    /// Put this entity into your container or inventory.
    AddItem(EntityId),

    /// Take this entity out of your container or inventory.
    RemoveItem(EntityId),

    /// Location-targeted pick-up by display name.
    TakeNamed(String),

    /// Hand the named item from your container to the player.
    TakeFrom(String),

    /// Accept this entity from the player's inventory into your container.
    PutItem(EntityId),

    Heal(i32),
    Damage(i32),
}

impl MessageKind {
    /// Wire tag of the message kind, used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            MessageKind::Inspect => "inspect",
            MessageKind::LookIn => "look_in",
            MessageKind::Use { .. } => "use",
            MessageKind::Unlock(_) => "unlock",
            MessageKind::Open => "open",
            MessageKind::Close => "close",
            MessageKind::AddItem(_) => "addItem",
            MessageKind::RemoveItem(_) => "removeItem",
            MessageKind::TakeNamed(_) => "take_named",
            MessageKind::TakeFrom(_) => "take_from",
            MessageKind::PutItem(_) => "put_item",
            MessageKind::Heal(_) => "heal",
            MessageKind::Damage(_) => "damage",
        }
    }
}

/// An immutable point-to-point message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: RecipientId,
    pub to: RecipientId,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(from: impl Into<RecipientId>, to: impl Into<RecipientId>, kind: MessageKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    /// A message from the player.
    pub fn from_player(to: impl Into<RecipientId>, kind: MessageKind) -> Self {
        Self::new(RecipientId::player(), to, kind)
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_identities() {
        assert_eq!(RecipientId::player().as_str(), "player");
        assert_eq!(RecipientId::location(LocationId(7)).as_str(), "location_7");
    }

    #[test]
    fn test_message_tags() {
        assert_eq!(MessageKind::LookIn.tag(), "look_in");
        assert_eq!(MessageKind::AddItem(EntityId(0)).tag(), "addItem");
        assert_eq!(MessageKind::Use { target: None }.tag(), "use");
        assert_eq!(MessageKind::TakeNamed("torch".into()).tag(), "take_named");
    }

    #[test]
    fn test_message_from_player() {
        let message = Message::from_player("chest_1", MessageKind::Open);
        assert_eq!(message.from, RecipientId::player());
        assert_eq!(message.to.as_str(), "chest_1");
        assert_eq!(message.tag(), "open");
    }
}
