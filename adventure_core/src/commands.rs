//! Player verbs and the alias table that maps typed words onto them.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::Result;
use crate::game::Game;
use crate::messaging::{Message, MessageKind, RecipientId};

/// A built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Go,
    Look,
    LookIn,
    Inventory,
    Take,
    Put,
    Open,
    Close,
    Use,
    Alias,
    Help,
    Debug,
    Quit,
}

impl Verb {
    /// Words registered for each verb at startup.
    pub const BUILTIN: [(&'static str, Verb); 14] = [
        ("go", Verb::Go),
        ("move", Verb::Go),
        ("look", Verb::Look),
        ("look in", Verb::LookIn),
        ("inventory", Verb::Inventory),
        ("take", Verb::Take),
        ("put", Verb::Put),
        ("open", Verb::Open),
        ("close", Verb::Close),
        ("use", Verb::Use),
        ("alias", Verb::Alias),
        ("help", Verb::Help),
        ("debug", Verb::Debug),
        ("quit", Verb::Quit),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Error: cannot alias nonexistent command '{0}'.")]
    UnknownCommand(String),

    #[error("Error: '{0}' is already a command.")]
    ShadowsCommand(String),
}

/// Command words and user-defined aliases.
#[derive(Debug, Clone)]
pub struct CommandManager {
    commands: HashMap<String, Verb>,
    aliases: HashMap<String, String>,
}

impl Default for CommandManager {
    fn default() -> Self {
        let mut manager = Self::empty();
        for (name, verb) in Verb::BUILTIN {
            manager.register(name, verb);
        }
        manager
    }
}

impl CommandManager {
    /// A manager with no commands at all.
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Bind a command word. An existing binding is kept.
    pub fn register(&mut self, name: impl Into<String>, verb: Verb) -> bool {
        let name = name.into();
        if self.commands.contains_key(&name) {
            warn!(command = %name, "command already registered");
            return false;
        }
        self.commands.insert(name, verb);
        true
    }

    pub fn command_exists(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Map `alias` onto an existing command word. Re-aliasing replaces the
    /// previous target.
    pub fn add_alias(
        &mut self,
        alias: impl Into<String>,
        original: &str,
    ) -> std::result::Result<(), AliasError> {
        let alias = alias.into();
        if !self.command_exists(original) {
            return Err(AliasError::UnknownCommand(original.to_string()));
        }
        if self.command_exists(&alias) {
            return Err(AliasError::ShadowsCommand(alias));
        }
        debug!(%alias, original, "alias added");
        self.aliases.insert(alias, original.to_string());
        Ok(())
    }

    /// The verb a typed word stands for. Aliases are checked first.
    pub fn resolve(&self, name: &str) -> Option<Verb> {
        let name = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands.get(name).copied()
    }
}

/// Run one verb with its argument text.
pub(crate) fn execute(game: &mut Game, verb: Verb, args: &str) -> Result<()> {
    match verb {
        Verb::Go => go(game, args),
        Verb::Look => look(game, args),
        Verb::LookIn => look_in(game, args),
        Verb::Inventory => {
            game.view_inventory();
            Ok(())
        }
        Verb::Take => take(game, args),
        Verb::Put => put(game, args),
        Verb::Open => open(game, args),
        Verb::Close => close(game, args),
        Verb::Use => use_item(game, args),
        Verb::Alias => {
            alias(game, args);
            Ok(())
        }
        Verb::Help => {
            for line in HELP {
                game.say(*line);
            }
            Ok(())
        }
        Verb::Debug => {
            debug_world(game, args);
            Ok(())
        }
        Verb::Quit => {
            game.say("Quitting the game...");
            game.quit();
            Ok(())
        }
    }
}

const HELP: &[&str] = &[
    "",
    "Available commands:",
    "",
    "Disclaimer: A 'container' is an item that can have other items inside!:",
    "",
    "--- Navigation Commands ---",
    "GO [Compass direction]",
    "",
    "--- Inspection Commands ---",
    "LOOK",
    "LOOK AT [entity]",
    "LOOK IN [container]",
    "",
    "--- Inventory Commands ---",
    "INVENTORY",
    "TAKE [item] FROM [container]",
    "PUT [item] IN [container]",
    "OPEN [locked container] WITH [item]",
    "CLOSE [container]",
    "USE [item]",
    "",
    "--- System Commands ---",
    "HELP",
    "ALIAS [new command] [existing command]",
    "DEBUG",
    "QUIT",
];

/// Split `args` around the first standalone `keyword`.
fn split_on_word(args: &str, keyword: &str) -> (String, Option<String>) {
    let words: Vec<&str> = args.split_whitespace().collect();
    match words.iter().position(|word| *word == keyword) {
        Some(at) => (words[..at].join(" "), Some(words[at + 1..].join(" "))),
        None => (words.join(" "), None),
    }
}

fn send_to(game: &mut Game, to: RecipientId, kind: MessageKind) -> Result<()> {
    game.send(Message::from_player(to, kind))
}

fn go(game: &mut Game, args: &str) -> Result<()> {
    if args.is_empty() {
        game.say("Specify a direction to move.");
        return Ok(());
    }
    let direction = args.to_lowercase();
    let state = &mut game.state;
    state
        .player
        .go(&state.world, &direction, &mut state.transcript);
    game.display_location();
    Ok(())
}

fn look(game: &mut Game, args: &str) -> Result<()> {
    if args.is_empty() {
        game.display_location();
        return Ok(());
    }

    let Some(name) = args.strip_prefix("at ").map(str::trim) else {
        game.say(
            "Invalid look command. Use 'look' for the location, \
             'look at [entity]', or 'look in [container]'.",
        );
        return Ok(());
    };

    match game.find_nearby(name).and_then(|id| game.identity_of(id)) {
        Some(identity) => send_to(game, identity, MessageKind::Inspect),
        None => {
            game.say(format!("You don't see a {name} here."));
            Ok(())
        }
    }
}

fn look_in(game: &mut Game, args: &str) -> Result<()> {
    let name = args.to_lowercase();
    match game.find_nearby(&name).and_then(|id| game.identity_of(id)) {
        Some(identity) => send_to(game, identity, MessageKind::LookIn),
        None => {
            game.say(format!("You don't see a {name} here."));
            Ok(())
        }
    }
}

fn take(game: &mut Game, args: &str) -> Result<()> {
    let (item, container) = split_on_word(&args.to_lowercase(), "from");
    let item = item.as_str();
    if item.is_empty() {
        game.say("What do you want to take?");
        return Ok(());
    }

    match container.as_deref() {
        Some(container) => {
            match game.find_nearby(container).and_then(|id| game.identity_of(id)) {
                Some(identity) => {
                    send_to(game, identity, MessageKind::TakeFrom(item.to_string()))
                }
                None => {
                    game.say(format!("You don't see {container} here."));
                    Ok(())
                }
            }
        }
        None => {
            let location = RecipientId::location(game.current_location());
            send_to(game, location, MessageKind::TakeNamed(item.to_string()))
        }
    }
}

fn put(game: &mut Game, args: &str) -> Result<()> {
    let (item, Some(container)) = split_on_word(&args.to_lowercase(), "in") else {
        game.say("Usage: PUT [item] IN [container]");
        return Ok(());
    };
    let (item, container) = (item.as_str(), container.as_str());

    let Some(carried) = game.find_carried(item) else {
        game.say(format!("You don't have a {item} to put anywhere."));
        return Ok(());
    };
    let Some(identity) = game.find_nearby(container).and_then(|id| game.identity_of(id)) else {
        game.say(format!("You don't see a {container} here."));
        return Ok(());
    };

    send_to(game, identity, MessageKind::PutItem(carried))
}

fn open(game: &mut Game, args: &str) -> Result<()> {
    let (container, Some(key)) = split_on_word(&args.to_lowercase(), "with") else {
        game.say("Usage: OPEN [container] WITH [item]");
        return Ok(());
    };
    let (container, key) = (container.as_str(), key.as_str());

    let Some(identity) = game.find_nearby(container).and_then(|id| game.identity_of(id)) else {
        game.say(format!("You don't see a {container} here."));
        return Ok(());
    };
    let Some(key_name) = game
        .find_carried(key)
        .and_then(|id| game.world().entity(id))
        .map(|entity| entity.name.clone())
    else {
        game.say(format!("You don't have a {key}."));
        return Ok(());
    };

    send_to(game, identity.clone(), MessageKind::Unlock(key_name))?;
    send_to(game, identity, MessageKind::Open)
}

fn close(game: &mut Game, args: &str) -> Result<()> {
    let name = args.to_lowercase();
    if name.is_empty() {
        game.say("Usage: CLOSE [container]");
        return Ok(());
    }
    match game.find_nearby(&name).and_then(|id| game.identity_of(id)) {
        Some(identity) => send_to(game, identity, MessageKind::Close),
        None => {
            game.say(format!("You don't see a {name} here."));
            Ok(())
        }
    }
}

fn use_item(game: &mut Game, args: &str) -> Result<()> {
    let (item, target) = split_on_word(&args.to_lowercase(), "on");
    let item = item.as_str();

    match target.as_deref() {
        None => {
            let Some(identity) = game.find_carried(item).and_then(|id| game.identity_of(id))
            else {
                game.say(format!("You don't have a {item} to use."));
                return Ok(());
            };
            send_to(game, identity, MessageKind::Use { target: None })
        }
        Some(target) if !item.is_empty() && !target.is_empty() => {
            let found = game
                .find_carried(item)
                .or_else(|| game.world().find_in_location(game.current_location(), item))
                .and_then(|id| game.identity_of(id));
            let Some(identity) = found else {
                game.say(format!("You don't have a {item} to use."));
                return Ok(());
            };
            let target = Some(target.to_string());
            send_to(game, identity, MessageKind::Use { target })
        }
        Some(_) => {
            game.say("Usage: USE [item] ON [target]");
            Ok(())
        }
    }
}

fn alias(game: &mut Game, args: &str) {
    let mut words = args.split_whitespace();
    let (Some(alias), Some(original)) = (words.next(), words.next()) else {
        game.say("Usage: ALIAS [new command] [existing command]");
        return;
    };
    let (alias, original) = (alias.to_lowercase(), original.to_lowercase());

    match game.commands.add_alias(alias.as_str(), &original) {
        Ok(()) => game.say(format!("Alias created: {alias} -> {original}")),
        Err(e) => {
            warn!(%alias, %original, "alias rejected");
            game.say(e.to_string());
        }
    }
}

fn debug_world(game: &mut Game, args: &str) {
    if args.eq_ignore_ascii_case("json") {
        match serde_json::to_string_pretty(&game.debug_json()) {
            Ok(json) => game.say(json),
            Err(e) => warn!(%e, "world snapshot failed"),
        }
    } else {
        game.debug_tree();
    }
}
