use thiserror::Error;

use crate::ecs::entity::Entity;

/// Errors returned by [`World`](crate::ecs::world::World) operations.
///
/// Lookups never fail (they return `Option`), and removals are lenient (they report whether
/// anything was removed). Only operations that cannot be carried out at all return an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The entity is not live in the world, so there is nowhere to put the component.
    #[error("entity {0:?} is not live in this world")]
    EntityNotFound(Entity),

    /// [`World::update`](crate::ecs::world::World::update) was called from inside a system.
    #[error("world update is already in progress")]
    UpdateInProgress,
}

/// Convenience alias for results of world operations.
pub type Result<T> = std::result::Result<T, Error>;
