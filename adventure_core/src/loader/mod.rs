//! World loader - builds the world graph from the line-oriented world format.
//!
//! ```text
//! <id>;<name>;<description>;<dir1>=<id1>,<dir2>=<id2>
//!   <entityName>:<entityDescription>;[Prop1,Prop2=val]
//!     <nestedName>:<nestedDescription>;[...]
//! ```
//!
//! Loading happens in two passes:
//! 1. **Lines**: locations and entities are created in file order. Connections
//!    are only buffered, since they may point at locations declared later.
//! 2. **Connections**: buffered `(from, direction, to)` triples are wired once
//!    every location exists. Triples with an unknown endpoint are dropped.
//!
//! Nothing in a world file aborts the load: malformed lines are logged and skipped.

mod properties;

pub use properties::*;

use std::path::Path;

use game_rules::{EntityBlueprint, EntityId, Location, LocationId, World};
use tracing::{debug, info, warn};

use crate::error::{GameError, Result};
use crate::messaging::Dispatcher;
use crate::registry;

/// A connection waiting for the second pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingConnection {
    from: LocationId,
    direction: String,
    to: LocationId,
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub locations: usize,
    pub entities: usize,
    pub connections: usize,
    pub skipped_lines: usize,
    pub dropped_connections: usize,
}

/// Line-by-line parser state.
struct WorldLoader<'a> {
    world: World,
    dispatcher: &'a mut Dispatcher,
    current_location: Option<LocationId>,
    /// Most recent top-level container at the current location, with the
    /// indentation it was declared at.
    active_container: Option<(EntityId, usize)>,
    pending: Vec<PendingConnection>,
    summary: LoadSummary,
}

/// Parse a world from text, registering every location and entity with `dispatcher`.
pub fn load_world_str(text: &str, dispatcher: &mut Dispatcher) -> (World, LoadSummary) {
    let mut loader = WorldLoader {
        world: World::new(),
        dispatcher,
        current_location: None,
        active_container: None,
        pending: Vec::new(),
        summary: LoadSummary::default(),
    };

    for (index, raw) in text.lines().enumerate() {
        loader.line(index + 1, raw);
    }
    loader.finish()
}

/// Read and parse a world file.
pub fn load_world_file(
    path: impl AsRef<Path>,
    dispatcher: &mut Dispatcher,
) -> Result<(World, LoadSummary)> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading world");
    let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_world_str(&text, dispatcher))
}

/// Leading spaces and tabs, each counted as one level.
fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

impl WorldLoader<'_> {
    fn line(&mut self, line_no: usize, raw: &str) {
        let indent = indentation(raw);
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            self.location_line(line_no, line);
        } else {
            self.entity_line(line_no, line, indent);
        }
    }

    fn skip(&mut self, line_no: usize, line: &str, reason: &str) {
        warn!(line = line_no, text = line, reason, "skipped world line");
        self.summary.skipped_lines += 1;
    }

    fn location_line(&mut self, line_no: usize, line: &str) {
        let mut fields = line.split(';');
        let id = fields.next().map(str::trim).unwrap_or_default();
        let Ok(id) = id.parse::<u32>().map(LocationId) else {
            self.skip(line_no, line, "location id is not a number");
            return;
        };
        let name = fields.next().map(str::trim).unwrap_or_default();
        let description = fields.next().map(str::trim).unwrap_or_default();
        let connections = fields.next().unwrap_or_default();

        for connection in connections.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let parsed = connection
                .split_once('=')
                .and_then(|(dir, to)| Some((dir.trim(), to.trim().parse::<u32>().ok()?)));
            match parsed {
                Some((direction, to)) if !direction.is_empty() => {
                    self.pending.push(PendingConnection {
                        from: id,
                        direction: direction.to_string(),
                        to: LocationId(to),
                    });
                }
                _ => {
                    warn!(line = line_no, connection, "malformed connection ignored");
                }
            }
        }

        debug!(%id, name, "creating location");
        let location = Location::new(id, name, description);
        if !registry::add_location(&mut self.world, self.dispatcher, location) {
            warn!(line = line_no, %id, "location id declared twice, later declaration wins");
        }
        self.summary.locations += 1;

        self.current_location = Some(id);
        self.active_container = None;
    }

    fn entity_line(&mut self, line_no: usize, line: &str, indent: usize) {
        let Some(location) = self.current_location else {
            self.skip(line_no, line, "entity before any location");
            return;
        };

        let (name, rest) = line.split_once(':').unwrap_or((line, ""));
        let (description, raw_properties) = rest.split_once(';').unwrap_or((rest, ""));
        let (name, description) = (name.trim(), description.trim());
        if name.is_empty() || description.is_empty() {
            self.skip(line_no, line, "missing name or description");
            return;
        }

        let properties = Properties::parse(raw_properties);
        let is_container = properties.container;
        debug!(name, ?properties, "creating entity");

        let blueprint =
            EntityBlueprint::new(name, description).with_components(properties.into_components());
        let id = registry::spawn_entity(&mut self.world, self.dispatcher, blueprint);
        self.summary.entities += 1;

        match self.active_container {
            Some((container, depth)) if indent > depth => {
                self.world.add_to_container(container, id);
                debug!(entity = %id, container = %container, "nested entity");
            }
            _ => {
                self.world.place_in_location(location, id);
                self.active_container = is_container.then_some((id, indent));
            }
        }
    }

    fn finish(mut self) -> (World, LoadSummary) {
        for PendingConnection { from, direction, to } in std::mem::take(&mut self.pending) {
            if self.world.connect(from, &direction, to) {
                self.summary.connections += 1;
            } else {
                debug!(%from, direction = %direction, %to, "connection to unknown location dropped");
                self.summary.dropped_connections += 1;
            }
        }

        info!(
            locations = self.summary.locations,
            entities = self.summary.entities,
            connections = self.summary.connections,
            skipped = self.summary.skipped_lines,
            "world loaded"
        );
        (self.world, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{RecipientId, Route};

    fn load(text: &str) -> (World, LoadSummary, Dispatcher) {
        let mut dispatcher = Dispatcher::new();
        let (world, summary) = load_world_str(text, &mut dispatcher);
        (world, summary, dispatcher)
    }

    fn names(world: &World, ids: &[EntityId]) -> Vec<String> {
        world.names_of(ids).into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_forward_references_resolve() {
        let text = "1;Hall;A hall;north=2,down=3\n\
                    2;Tower;A tall tower;south=1\n\
                    3;Crypt;A crypt;up=1,east=9";
        let (world, summary, _) = load(text);

        let hall = world.location(LocationId(1)).unwrap();
        assert_eq!(hall.exit("north"), Some(LocationId(2)));
        assert_eq!(hall.exit("down"), Some(LocationId(3)));
        assert_eq!(hall.connections.len(), 2);
        assert_eq!(world.location(LocationId(2)).unwrap().exit("south"), Some(LocationId(1)));

        let crypt = world.location(LocationId(3)).unwrap();
        assert_eq!(crypt.exit("east"), None);
        assert_eq!(crypt.connections.len(), 1);
        assert_eq!(summary.connections, 4);
        assert_eq!(summary.dropped_connections, 1);
    }

    #[test]
    fn test_locations_are_registered() {
        let (_, _, dispatcher) = load("5;Attic;Dusty;\n");
        assert_eq!(
            dispatcher.route(&RecipientId::new("location_5")),
            Some(Route::Location(LocationId(5)))
        );
    }

    #[test]
    fn test_indentation_nests_into_container() {
        let text = "1;Hall;A hall;\n\
                    \x20\x20chest:A chest;[Container,Openable]\n\
                    \x20\x20\x20\x20coin:A coin;[Takeable]\n\
                    \t\t\tgem:A gem;[Takeable]\n\
                    \x20\x20lamp:A lamp;[Takeable]\n\
                    \x20\x20\x20\x20rope:Some rope;[Takeable]";
        let (world, summary, _) = load(text);

        let hall = world.location(LocationId(1)).unwrap();
        assert_eq!(names(&world, &hall.entities), vec!["chest", "lamp", "rope"]);

        let chest = world.find_in_location(LocationId(1), "chest").unwrap();
        assert_eq!(names(&world, world.entity(chest).unwrap().contents()), vec!["coin", "gem"]);
        assert_eq!(summary.entities, 5);
    }

    #[test]
    fn test_location_line_resets_container() {
        let text = "1;Hall;A hall;\n\
                    chest:A chest;[Container]\n\
                    2;Yard;A yard;\n\
                    \x20\x20stone:A stone;";
        let (world, _, _) = load(text);

        let chest = world.find_in_location(LocationId(1), "chest").unwrap();
        assert!(world.entity(chest).unwrap().contents().is_empty());
        assert!(world.find_in_location(LocationId(2), "stone").is_some());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "orphan:Before any location;[Takeable]\n\
                    1;Hall;A hall;north=x,=2,west\n\
                    \n\
                    :no name;[Takeable]\n\
                    nameless description\n\
                    key:A key;[Takeable]";
        let (world, summary, _) = load(text);

        assert_eq!(summary.skipped_lines, 3);
        assert_eq!(summary.entities, 1);
        assert!(world.location(LocationId(1)).unwrap().connections.is_empty());
        assert!(world.find_in_location(LocationId(1), "key").is_some());
    }

    #[test]
    fn test_entity_components_from_properties() {
        let text = "1;Hall;A hall;\n\
                    \x20\x20box:A brass box;[Container,Openable,Lockable=brass]\n\
                    \x20\x20torch:A lit torch;[Takeable,Usable,Health=+2]";
        let (world, _, dispatcher) = load(text);

        let boxed = world.find_in_location(LocationId(1), "box").unwrap();
        let entity = world.entity(boxed).unwrap();
        assert!(entity.is_container());
        assert!(entity.components.is_locked());
        assert!(entity.components.is_closed());
        assert_eq!(
            dispatcher.route(&RecipientId::new(entity.identity.as_str())),
            Some(Route::Entity(boxed))
        );

        // The torch is not a container, so it is a sibling of the box.
        let torch = world.find_in_location(LocationId(1), "torch").unwrap();
        assert!(world.entity(torch).unwrap().is_takeable());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut dispatcher = Dispatcher::new();
        let result = load_world_file("/definitely/not/here.txt", &mut dispatcher);
        assert!(matches!(result, Err(GameError::Io { .. })));
    }
}
