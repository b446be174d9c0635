//! Entity and aggregate root abstractions.

use std::hash::{Hash, Hasher};

use common::UniqueEntityId;

/// An object with a stable identity.
///
/// Equality and hashing consider the id only: two entities with the same
/// id are the same entity even when their properties differ. Properties are
/// readable through [`Entity::props`] and change only through the methods
/// each entity type defines.
#[derive(Debug, Clone)]
pub struct Entity<P> {
    id: UniqueEntityId,
    props: P,
}

impl<P> Entity<P> {
    /// Wraps already validated properties. A missing id is minted.
    pub(crate) fn new(props: P, id: Option<UniqueEntityId>) -> Self {
        Self {
            id: id.unwrap_or_default(),
            props,
        }
    }

    pub fn id(&self) -> &UniqueEntityId {
        &self.id
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub(crate) fn props_mut(&mut self) -> &mut P {
        &mut self.props
    }
}

impl<P> PartialEq for Entity<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Entity<P> {}

impl<P> Hash for Entity<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An entity that is the consistency boundary of its cluster.
///
/// Inner entities are reached and changed only through their root.
pub trait AggregateRoot {
    /// Returns the aggregate type name.
    ///
    /// Used for store organization and log fields.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's unique identifier.
    fn root_id(&self) -> &UniqueEntityId;
}
