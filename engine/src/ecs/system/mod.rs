//! Systems: units of behavior that operate on a [`World`].
//!
//! A system is any `'static` type implementing [`System`]. The world keeps registered systems in
//! an ordered [`Registry`] and identifies them by their concrete Rust type, so lookups and
//! removals are expressed with a type parameter:
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{System, world::World};
//!
//! struct Movement;
//!
//! impl System for Movement {
//!     fn update(&mut self, world: &mut World) {
//!         let movers = world.entities_by_type::<Velocity>().to_vec();
//!         for entity in movers {
//!             let Some(&vel) = world.get_component::<Velocity>(entity) else { continue };
//!             if let Some(pos) = world.get_component_mut::<Position>(entity) {
//!                 pos.x += vel.dx;
//!                 pos.y += vel.dy;
//!             }
//!         }
//!     }
//! }
//!
//! world.add_system(Movement);
//! assert!(world.has_system::<Movement>());
//! world.update()?;
//! ```
//!
//! When and how often systems run is up to the caller. [`World::update`] performs a single pass
//! over every registered system in registration order; a game loop or simulation driver decides
//! the cadence.

use std::any::Any;

use crate::ecs::world::World;

mod registry;

pub use registry::Registry;

/// A unit of behavior invoked with the world.
///
/// `update` is a no-op by default, so marker systems only need an empty impl (or
/// `#[derive(System)]`).
pub trait System: AsAny + 'static {
    /// Read and write the world. Called once per [`World::update`] pass.
    fn update(&mut self, _world: &mut World) {}
}

/// Type-erasure support for [`System`] trait objects.
///
/// Implemented for every `'static` type. Always call these through `&dyn System` (not through a
/// `Box<dyn System>`), otherwise the box itself is what gets erased.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
