use std::any::Any;

use fixedbitset::FixedBitSet;

use crate::ecs::component::{self, Component};

/// The bag of components owned by a single entity, at most one per component type.
///
/// Values are slotted by [`component::Id`], with a bitset mirroring which slots are occupied.
/// The bag only knows ids; callers are responsible for passing the id registered for `C`.
///
/// Mutation is crate-private: the [`World`](crate::ecs::world::World) must see every change so
/// it can keep its type index in sync.
#[derive(Debug, Default)]
pub struct Components {
    /// Occupied slots, indexed by component id.
    mask: FixedBitSet,

    /// The component values, indexed by component id.
    values: Vec<Option<Box<dyn Any + Send + Sync>>>,
}

impl Components {
    /// Create an empty bag.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a component is stored under `id`.
    #[inline]
    pub fn has(&self, id: component::Id) -> bool {
        self.mask.contains(id.index())
    }

    /// Get the component stored under `id`, if any.
    pub fn get<C: Component>(&self, id: component::Id) -> Option<&C> {
        self.values
            .get(id.index())?
            .as_ref()?
            .downcast_ref::<C>()
    }

    /// The ids of every component in the bag, in ascending id order.
    pub fn ids(&self) -> impl Iterator<Item = component::Id> + '_ {
        self.mask.ones().map(component::Id::from)
    }

    /// The number of components in the bag.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.count_ones(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get_mut<C: Component>(&mut self, id: component::Id) -> Option<&mut C> {
        self.values
            .get_mut(id.index())?
            .as_mut()?
            .downcast_mut::<C>()
    }

    /// Store `component` under `id`, returning the value it replaced.
    pub(crate) fn set<C: Component>(&mut self, id: component::Id, component: C) -> Option<C> {
        let index = id.index();
        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
            self.mask.grow(index + 1);
        }
        self.mask.insert(index);
        self.values[index]
            .replace(Box::new(component))
            .and_then(|old| old.downcast::<C>().ok())
            .map(|old| *old)
    }

    /// Remove the component stored under `id`. A no-op returning `None` if there is none.
    pub(crate) fn remove<C: Component>(&mut self, id: component::Id) -> Option<C> {
        if !self.has(id) {
            return None;
        }
        self.mask.set(id.index(), false);
        self.values[id.index()]
            .take()
            .and_then(|old| old.downcast::<C>().ok())
            .map(|old| *old)
    }
}
