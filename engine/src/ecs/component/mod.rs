//! Component types and their identity.
//!
//! Components are plain data attached to entities. The ECS never looks at component values; it
//! only cares about the component's *type*, which is the key used by every index in the
//! [`World`](crate::ecs::world::World).
//!
//! ## Architecture
//!
//! - [`Component`]: The trait that all component types must implement
//! - [`Id`]: A dense identifier assigned to each component type on first use
//! - [`Info`]: Metadata about a registered component type
//! - [`Registry`]: Thread-safe mapping from Rust types to [`Id`]s
//!
//! ## Usage
//!
//! ```ignore
//! use rusty_ecs::ecs::component::{Component, Registry};
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let registry = Registry::new();
//! let pos_id = registry.register::<Position>();
//! assert_eq!(registry.register::<Position>(), pos_id);
//! ```

mod registry;

use std::any::TypeId as StdTypeId;
use std::fmt;

pub use registry::Registry;

/// A component identifier. Ids are dense, starting at zero, in registration order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component in the ECS (Entity Component System).
///
/// At present this only sets the required trait bounds for a type to be used as a component.
/// Use `#[derive(Component)]` from `rusty_ecs_macros` to implement it.
pub trait Component: 'static + Sized + Send + Sync {}

/// Metadata about a registered component type.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Info {
    /// The assigned component id.
    id: Id,

    /// The Rust TypeId for runtime type checking.
    type_id: StdTypeId,

    /// The Rust type name, for diagnostics only.
    name: &'static str,
}

impl Info {
    /// Construct info for component type `C` with the given id.
    #[inline]
    pub(crate) fn new<C: Component>(id: Id) -> Self {
        Self {
            id,
            type_id: StdTypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn type_id(&self) -> StdTypeId {
        self.type_id
    }

    /// The fully qualified Rust type name of the component.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Info")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
