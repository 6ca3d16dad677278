//! The World is the central container for all entities, components, and systems in the ECS.
//!
//! # Architecture
//!
//! A world keeps three indexes that must always agree with each other:
//!
//! - **Live entities**: an insertion-ordered [`EntitySet`] of every live entity, in creation order.
//! - **Component bags**: each live entity's [`Components`], the sole owner of its component values.
//! - **Type index**: for each component type, an insertion-ordered [`EntitySet`] of the entities
//!   currently carrying a component of that type. Buckets hold handles only, never values.
//!
//! All mutation goes through the world, which maintains these invariants:
//!
//! 1. An entity is in the bucket for type `T` if and only if its bag holds a `T`.
//! 2. A bucket never holds the same entity twice. Attaching a second `T` replaces the value in the
//!    bag and leaves the bucket as is.
//! 3. Destroying an entity removes it from every bucket it was in.
//!
//! # Missing entities and components
//!
//! Lookups return `Option`. Removals are lenient: destroying a dead entity, detaching a missing
//! component, or removing an unregistered system does nothing and reports that nothing happened.
//!
//! # Threading
//!
//! A world is `!Send` and `!Sync`. Every mutator takes `&mut self`, so there is exactly one writer
//! at a time by construction. Only the component [`Registry`](component::Registry) may be shared
//! between threads (see [`Config::with_registry`]).
//!
//! # Example
//!
//! ```ignore
//! use rusty_ecs::ecs::world::{Id, World};
//!
//! let mut world = World::new(Id::new(1));
//!
//! let entity = world.create_entity();
//! world.attach_component(entity, Position { x: 0.0, y: 0.0 })?;
//! world.attach_component(entity, Velocity { dx: 1.0, dy: 0.0 })?;
//!
//! for pos in world.components_by_type::<Position>() {
//!     println!("({}, {})", pos.x, pos.y);
//! }
//!
//! world.destroy_entity(entity);
//! ```
mod config;

use std::{marker::PhantomData, mem, sync::Arc};

use log::{debug, trace, warn};

use crate::ecs::{
    component::{self, Component},
    entity::{self, Components, Entity},
    error::{Error, Result},
    storage::{EntitySet, SparseIndex},
    system::{self, System},
};

pub use config::Config;

/// The bucket returned for component types no entity has ever carried.
static EMPTY_BUCKET: EntitySet = EntitySet::new();

/// A world identifier. This is a unique identifier for a world in the ECS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Create a new world identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Id(id)
    }

    /// Get the raw identifier value.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// The World is the central container for all entities, components, and systems.
///
/// A world never leaves the thread that created it:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<rusty_ecs::ecs::World>();
/// ```
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<rusty_ecs::ecs::World>();
/// ```
pub struct World {
    /// The world's unique identifier.
    id: Id,

    /// Block size for the sparse indexes this world creates.
    block_size: usize,

    /// Component type identities, possibly shared with other worlds.
    registry: Arc<component::Registry>,

    /// The world's entity allocator.
    allocator: entity::Allocator,

    /// Live entities in creation order.
    entities: EntitySet,

    /// Each live entity's components.
    bags: SparseIndex<Components>,

    /// Entities carrying each component type, indexed by component id.
    buckets: Vec<EntitySet>,

    /// Registered systems, in registration order.
    systems: system::Registry,

    /// Set while `update` is running systems.
    updating: bool,

    /// Marker to make World !Send and !Sync.
    _not_send: PhantomData<*mut ()>,
}

impl World {
    /// Create a world with the default [`Config`].
    pub fn new(id: Id) -> Self {
        Self::with_config(id, Config::default())
    }

    /// Create a world with the given [`Config`].
    pub fn with_config(id: Id, config: Config) -> Self {
        let block_size = config.index_block_size.max(1);
        debug!("creating world {:?} (index block size {})", id, block_size);
        Self {
            id,
            block_size,
            registry: config.registry.unwrap_or_default(),
            allocator: entity::Allocator::new(),
            entities: EntitySet::with_block_size(block_size),
            bags: SparseIndex::with_block_size(block_size),
            buckets: Vec::new(),
            systems: system::Registry::new(),
            updating: false,
            _not_send: PhantomData,
        }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// The component registry this world assigns component ids from.
    #[inline]
    pub fn registry(&self) -> &Arc<component::Registry> {
        &self.registry
    }

    // ---------------------------------------------------------------------------------------------
    // Entities
    // ---------------------------------------------------------------------------------------------

    /// Create a new, empty entity and append it to the live-entity list.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.alloc();
        self.entities.insert(entity);
        self.bags.insert(entity, Components::new());
        trace!("created {:?}", entity);
        entity
    }

    /// Returns `true` if the entity is live in this world.
    #[inline]
    pub fn has_entity(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Destroy the entity, dropping its components and removing it from every type bucket.
    ///
    /// Returns `false`, and does nothing else, if the entity is not live.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(entity) {
            warn!("attempted to destroy an entity that is not live: {:?}", entity);
            return false;
        }

        // The bag lists exactly the buckets this entity is in.
        if let Some(bag) = self.bags.remove(entity) {
            for id in bag.ids() {
                if let Some(bucket) = self.buckets.get_mut(id.index()) {
                    bucket.remove(entity);
                }
            }
        }

        self.allocator.free(entity);
        trace!("destroyed {:?}", entity);
        true
    }

    /// Iterate the live entities in creation order.
    #[inline]
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    /// The number of live entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only view of an entity's component bag, if the entity is live.
    #[inline]
    pub fn components_of(&self, entity: Entity) -> Option<&Components> {
        self.bags.get(entity)
    }

    // ---------------------------------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------------------------------

    /// Returns `true` if the entity is indexed as carrying a `C`.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.bucket(self.registry.get::<C>())
            .contains(entity)
    }

    /// Attach a component to a live entity.
    ///
    /// If the entity already carries a `C` the value is replaced and the old one is returned; the
    /// entity keeps its position in the `C` bucket.
    ///
    /// # Errors
    ///
    /// [`Error::EntityNotFound`] if the entity is not live.
    pub fn attach_component<C: Component>(
        &mut self,
        entity: Entity,
        component: C,
    ) -> Result<Option<C>> {
        let id = self.registry.register::<C>();
        let bag = self
            .bags
            .get_mut(entity)
            .ok_or(Error::EntityNotFound(entity))?;
        let previous = bag.set(id, component);
        self.bucket_mut(id).insert(entity);
        trace!("attached {} to {:?}", std::any::type_name::<C>(), entity);
        Ok(previous)
    }

    /// Detach the entity's `C`, returning it. Does nothing if there is none.
    pub fn detach_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        let id = self.registry.get::<C>()?;
        let removed = self.bags.get_mut(entity)?.remove::<C>(id);
        if let Some(bucket) = self.buckets.get_mut(id.index()) {
            bucket.remove(entity);
        }
        if removed.is_some() {
            trace!("detached {} from {:?}", std::any::type_name::<C>(), entity);
        }
        removed
    }

    /// Get the entity's `C`, if it has one.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        let id = self.registry.get::<C>()?;
        self.bags.get(entity)?.get::<C>(id)
    }

    /// Get the entity's `C` mutably, if it has one.
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        let id = self.registry.get::<C>()?;
        self.bags.get_mut(entity)?.get_mut::<C>(id)
    }

    /// The entities carrying a `C`, in the order the component was first attached.
    ///
    /// Empty if no entity carries a `C`.
    pub fn entities_by_type<C: Component>(&self) -> &EntitySet {
        self.bucket(self.registry.get::<C>())
    }

    /// Every `C` in the world, in the same order as [`entities_by_type`](Self::entities_by_type).
    pub fn components_by_type<C: Component>(&self) -> impl Iterator<Item = &C> + '_ {
        let id = self.registry.get::<C>();
        self.bucket(id).iter().filter_map(move |entity| {
            let id = id?;
            self.bags.get(entity)?.get::<C>(id)
        })
    }

    /// The bucket for a component id, or the shared empty bucket.
    fn bucket(&self, id: Option<component::Id>) -> &EntitySet {
        id.and_then(|id| self.buckets.get(id.index()))
            .unwrap_or(&EMPTY_BUCKET)
    }

    /// The bucket for a component id, created on demand.
    fn bucket_mut(&mut self, id: component::Id) -> &mut EntitySet {
        let index = id.index();
        if index >= self.buckets.len() {
            let block_size = self.block_size;
            self.buckets
                .resize_with(index + 1, || EntitySet::with_block_size(block_size));
        }
        &mut self.buckets[index]
    }

    // ---------------------------------------------------------------------------------------------
    // Systems
    // ---------------------------------------------------------------------------------------------

    /// Returns `true` if a system of type `S` is registered.
    #[inline]
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains::<S>()
    }

    /// Get the first registered system of type `S`.
    #[inline]
    pub fn get_system<S: System>(&self) -> Option<&S> {
        self.systems.get::<S>()
    }

    /// Get the first registered system of type `S`, mutably.
    #[inline]
    pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems.get_mut::<S>()
    }

    /// Append a system to the registry. Registering a second system of the same type is allowed.
    pub fn add_system<S: System>(&mut self, system: S) {
        if self.systems.contains::<S>() {
            debug!(
                "registering another instance of system {}",
                std::any::type_name::<S>()
            );
        }
        self.systems.add(system);
        trace!("added system {}", std::any::type_name::<S>());
    }

    /// Remove the first registered system of type `S`, returning it. Does nothing if there is none.
    pub fn remove_system<S: System>(&mut self) -> Option<S> {
        let removed = self.systems.remove::<S>();
        if removed.is_some() {
            trace!("removed system {}", std::any::type_name::<S>());
        }
        removed
    }

    /// The number of registered systems.
    #[inline]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// The type names of the registered systems, in registration order.
    #[inline]
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.names()
    }

    /// Run every registered system once, in registration order.
    ///
    /// While the pass runs, the running systems are detached from the world: systems added during
    /// the pass are appended after it, and system lookups from inside a system only see systems
    /// added during the pass.
    ///
    /// # Errors
    ///
    /// [`Error::UpdateInProgress`] if called from inside a system.
    pub fn update(&mut self) -> Result<()> {
        if self.updating {
            return Err(Error::UpdateInProgress);
        }

        let running = mem::take(&mut self.systems);
        debug!("world {:?} updating {} systems", self.id, running.len());

        self.updating = true;
        let mut pass = UpdatePass {
            world: self,
            running,
        };
        pass.running.update_all(&mut *pass.world);
        Ok(())
    }
}

/// The systems detached from a world for the duration of an update pass.
///
/// Dropping the pass reattaches them, also when a system panics.
struct UpdatePass<'w> {
    world: &'w mut World,
    running: system::Registry,
}

impl Drop for UpdatePass<'_> {
    fn drop(&mut self) {
        self.world.updating = false;

        // Systems added during the pass go after the ones that ran.
        let mut added = mem::replace(&mut self.world.systems, mem::take(&mut self.running));
        self.world.systems.append(&mut added);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Id(0))
    }
}
