//! A minimal Entity-Component-System core.
//!
//! The [`World`](ecs::World) tracks a dynamic set of entities, attaches and detaches typed
//! components to them, indexes components by type for bulk retrieval, and keeps an ordered
//! registry of [`System`](ecs::System)s. See the [`ecs::world`] module docs for the invariants
//! the world maintains.

// Lets the derive macros refer to `::rusty_ecs` from inside this crate.
extern crate self as rusty_ecs;

pub mod ecs;
pub mod logging;
