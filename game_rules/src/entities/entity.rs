//! The entity record.

use serde::{Deserialize, Serialize};

use super::{Components, EntityId};

/// Everything needed to create an entity, before it has a handle or identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityBlueprint {
    pub name: String,
    pub description: String,
    pub components: Components,
}

impl EntityBlueprint {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            components: Components::default(),
        }
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }
}

/// An addressable game object: an item, a container or a prop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,

    /// Unique dispatcher identity. Display names may repeat, identities never do.
    pub identity: String,

    pub name: String,
    pub description: String,
    pub components: Components,
}

impl Entity {
    /// Case-insensitive display-name comparison.
    ///
    /// Both sides are folded with `to_lowercase`, the same rule the command
    /// layer applies to typed input.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn is_takeable(&self) -> bool {
        self.components.takeable.is_some()
    }

    pub fn is_container(&self) -> bool {
        self.components.container.is_some()
    }

    /// Contents of the container component, or nothing for non-containers.
    pub fn contents(&self) -> &[EntityId] {
        self.components
            .container
            .as_ref()
            .map(|c| c.contents())
            .unwrap_or(&[])
    }
}
