//! Index structures backing the [`World`](crate::ecs::world::World).
//!
//! - [`SparseIndex`]: entity handle → value, used to own each entity's component bag.
//! - [`EntitySet`]: insertion-ordered entity set, used for the live-entity list and for every
//!   per-component-type bucket of the type index.
//!
//! Neither structure owns component data. Buckets only hold entity handles; the bag stored in the
//! world's `SparseIndex` is the single owner of each component value.

mod index;
mod set;

pub use index::SparseIndex;
pub use set::{EntitySet, Iter};
