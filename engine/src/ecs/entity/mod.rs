//! Entity handles and allocation.
//!
//! An [`Entity`] is a lightweight, copyable handle. The data it stands for, its bag of
//! [`Components`], is owned by the [`World`](crate::ecs::world::World) and can only be changed
//! through the world so that the world's type index stays consistent with it.
//!
//! # Generation Tracking
//!
//! Each handle combines an [`Id`] (the slot) with a [`Generation`] (how many times that slot has
//! been reused). When an entity is destroyed its slot is recycled with the next generation, so a
//! stale handle never aliases the entity that later takes its slot:
//!
//! ```rust,ignore
//! let entity = allocator.alloc(); // Entity { id: 0, generation: 0 }
//! allocator.free(entity);
//! let reused = allocator.alloc();  // Entity { id: 0, generation: 1 }
//! assert_ne!(entity, reused);
//! ```

mod components;

use std::fmt;

use crossbeam::queue::SegQueue;

pub use components::Components;

/// The generation of an entity, used to track whether an entity is the active entity in a world.
/// The generation starts at `FIRST` and is incremented each time an entity's `id` is recycled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of an entity.
    pub const FIRST: Self = Self(0);

    /// Get the next generation from the current.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// An entity identifier (the slot part of an [`Entity`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A handle to an entity in a world.
///
/// Two handles are equal only if both their `id` and `generation` match. Handles are ordered by
/// id first, then generation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    /// The slot of the entity.
    id: Id,

    /// The generation of the entity.
    generation: Generation,
}

impl Entity {
    /// Construct a new entity with just an id. This will default to the first generation.
    #[inline]
    pub(crate) fn new(id: impl Into<Id>) -> Self {
        Self::new_with_generation(id.into(), Generation::FIRST)
    }

    /// Construct a new entity with an id and known generation.
    #[inline]
    pub(crate) const fn new_with_generation(id: Id, generation: Generation) -> Self {
        Self { id, generation }
    }

    /// Get the id of this entity.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the generation of this entity.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.id.0 as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.id.0, self.generation.0)
    }
}

/// An allocator for entity handles.
///
/// Freed ids are recycled first-in first-out, with their generation bumped so that handles to the
/// freed entity go stale.
#[derive(Default, Debug)]
pub struct Allocator {
    /// Current generation for each id slot, indexed by entity id.
    generations: Vec<Generation>,

    /// Pool of ids available for reuse.
    dead_pool: SegQueue<Id>,
}

impl Allocator {
    /// Construct a new entity allocator starting from id 0.
    #[inline]
    pub const fn new() -> Self {
        Self {
            generations: Vec::new(),
            dead_pool: SegQueue::new(),
        }
    }

    /// Allocate a new entity, either by reusing a freed id from the dead pool or by allocating a
    /// new one.
    pub fn alloc(&mut self) -> Entity {
        if let Some(id) = self.dead_pool.pop() {
            return Entity::new_with_generation(id, self.generations[id.0 as usize]);
        }

        let id = Id(self.generations.len() as u32);
        self.generations.push(Generation::FIRST);
        Entity::new(id)
    }

    /// Free an entity so its id can be reused.
    ///
    /// Freeing a handle whose generation is already stale is ignored.
    pub fn free(&mut self, entity: Entity) {
        let Some(generation) = self.generations.get_mut(entity.index()) else {
            return;
        };
        if *generation != entity.generation {
            return;
        }
        *generation = generation.next();
        self.dead_pool.push(entity.id);
    }

    /// The number of ids ever handed out, live or dead.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}
