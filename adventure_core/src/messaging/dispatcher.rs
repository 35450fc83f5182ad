//! The synchronous, re-entrant message dispatcher.

use std::collections::HashMap;

use game_rules::{EntityId, LocationId};
use tracing::{debug, trace, warn};

use super::{Message, RecipientId};
use crate::error::{GameError, Result};

/// Default ceiling for nested deliveries.
pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 64;

/// Which handler a registered identity is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Player,
    Location(LocationId),
    Entity(EntityId),
}

/// Receives delivered messages.
///
/// The dispatcher is handed back to the handler so it can send follow-up
/// messages before returning; those are delivered depth-first, in call order.
pub trait MessageHandler {
    fn handle(&mut self, dispatcher: &mut Dispatcher, route: Route, message: &Message)
        -> Result<()>;
}

/// Maps unique identities to routes and delivers messages to them.
///
/// One dispatcher belongs to one game session.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    recipients: HashMap<RecipientId, Route>,
    depth: usize,
    max_depth: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DISPATCH_DEPTH)
    }

    /// Create a dispatcher that refuses to nest deliveries deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            recipients: HashMap::new(),
            depth: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Register a recipient. Returns false, leaving the existing route in
    /// place, if the identity is already taken.
    pub fn register(&mut self, id: impl Into<RecipientId>, route: Route) -> bool {
        let id = id.into();
        if self.recipients.contains_key(&id) {
            warn!(recipient = %id, "recipient already registered");
            return false;
        }
        debug!(recipient = %id, ?route, "registered recipient");
        self.recipients.insert(id, route);
        true
    }

    pub fn route(&self, id: &RecipientId) -> Option<Route> {
        self.recipients.get(id).copied()
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    /// Number of deliveries currently on the call stack.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Deliver `message` to its recipient and return once the handler, and
    /// everything it sent in turn, has finished.
    ///
    /// Messages to unknown identities are logged and dropped.
    pub fn send<H>(&mut self, handler: &mut H, message: Message) -> Result<()>
    where
        H: MessageHandler + ?Sized,
    {
        trace!(
            from = %message.from,
            to = %message.to,
            kind = message.tag(),
            depth = self.depth,
            "sending message"
        );

        let Some(route) = self.route(&message.to) else {
            warn!(to = %message.to, kind = message.tag(), "no recipient found, message dropped");
            return Ok(());
        };

        if self.depth >= self.max_depth {
            return Err(GameError::DispatchDepthExceeded {
                limit: self.max_depth,
                tag: message.tag(),
            });
        }

        self.depth += 1;
        let result = handler.handle(self, route, &message);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessageKind;

    /// Records deliveries and optionally bounces every message back to its sender.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(Route, &'static str, usize)>,
        echo: bool,
    }

    impl MessageHandler for Recorder {
        fn handle(
            &mut self,
            dispatcher: &mut Dispatcher,
            route: Route,
            message: &Message,
        ) -> Result<()> {
            self.seen.push((route, message.tag(), dispatcher.depth()));
            if self.echo {
                let reply = Message::new(message.to.clone(), message.from.clone(), MessageKind::Inspect);
                dispatcher.send(self, reply)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut dispatcher = Dispatcher::new();
        assert!(dispatcher.register("player", Route::Player));
        assert!(!dispatcher.register("player", Route::Entity(EntityId(3))));
        assert_eq!(dispatcher.route(&RecipientId::player()), Some(Route::Player));
        assert_eq!(dispatcher.recipient_count(), 1);
    }

    #[test]
    fn test_send_reaches_registered_route() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("lamp_1", Route::Entity(EntityId(0)));
        let mut recorder = Recorder::default();

        dispatcher
            .send(&mut recorder, Message::from_player("lamp_1", MessageKind::Open))
            .unwrap();

        assert_eq!(recorder.seen, vec![(Route::Entity(EntityId(0)), "open", 1)]);
        assert_eq!(dispatcher.depth(), 0);
    }

    #[test]
    fn test_unknown_recipient_is_dropped() {
        let mut dispatcher = Dispatcher::new();
        let mut recorder = Recorder::default();

        let result = dispatcher.send(&mut recorder, Message::from_player("ghost", MessageKind::Inspect));

        assert!(result.is_ok());
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn test_ping_pong_fails_fast_at_depth_limit() {
        let mut dispatcher = Dispatcher::with_max_depth(8);
        dispatcher.register("a", Route::Entity(EntityId(0)));
        dispatcher.register("b", Route::Entity(EntityId(1)));
        let mut recorder = Recorder {
            echo: true,
            ..Default::default()
        };

        let result = dispatcher.send(&mut recorder, Message::new("a", "b", MessageKind::Inspect));

        assert!(matches!(
            result,
            Err(GameError::DispatchDepthExceeded { limit: 8, tag: "inspect" })
        ));
        assert_eq!(recorder.seen.len(), 8);
        assert_eq!(recorder.seen.last().map(|s| s.2), Some(8));
        assert_eq!(dispatcher.depth(), 0);
    }
}
