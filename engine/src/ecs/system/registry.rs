//! System registry for storing and retrieving ECS systems.
//!
//! The [`Registry`] keeps systems in registration order and identifies each one by its concrete
//! type. Registering two systems of the same type is allowed; type-based lookups and removals act
//! on the first match.

use std::any::TypeId;
use std::fmt;

use crate::ecs::{system::System, world::World};

/// A registered system and its type identity.
struct Entry {
    /// The concrete type of `system`.
    type_id: TypeId,

    /// The concrete type name, for diagnostics.
    name: &'static str,

    system: Box<dyn System>,
}

impl Entry {
    #[inline]
    fn is<S: System>(&self) -> bool {
        self.type_id == TypeId::of::<S>()
    }
}

/// An ordered registry of systems.
#[derive(Default)]
pub struct Registry {
    /// All registered systems, in registration order.
    entries: Vec<Entry>,
}

impl Registry {
    /// Create a new, empty system registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a system to the registry. Duplicates of the same type are not rejected.
    pub fn add<S: System>(&mut self, system: S) {
        self.entries.push(Entry {
            type_id: TypeId::of::<S>(),
            name: std::any::type_name::<S>(),
            system: Box::new(system),
        });
    }

    /// Returns `true` if some registered system is of type `S`.
    #[inline]
    pub fn contains<S: System>(&self) -> bool {
        self.entries.iter().any(Entry::is::<S>)
    }

    /// Get the first registered system of type `S`.
    pub fn get<S: System>(&self) -> Option<&S> {
        self.entries
            .iter()
            .find(|entry| entry.is::<S>())
            .and_then(|entry| (*entry.system).as_any().downcast_ref::<S>())
    }

    /// Get the first registered system of type `S`, mutably.
    pub fn get_mut<S: System>(&mut self) -> Option<&mut S> {
        self.entries
            .iter_mut()
            .find(|entry| entry.is::<S>())
            .and_then(|entry| (*entry.system).as_any_mut().downcast_mut::<S>())
    }

    /// Remove the first registered system of type `S`, returning it. A no-op if there is none.
    pub fn remove<S: System>(&mut self) -> Option<S> {
        let position = self.entries.iter().position(Entry::is::<S>)?;
        let entry = self.entries.remove(position);
        entry.system.into_any().downcast::<S>().ok().map(|system| *system)
    }

    /// The number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The type names of the registered systems, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Run every system once, in registration order.
    pub(crate) fn update_all(&mut self, world: &mut World) {
        for entry in self.entries.iter_mut() {
            log::trace!("updating system {}", entry.name);
            entry.system.update(world);
        }
    }

    /// Move every system out of `other` and append it to this registry, keeping `other`'s order.
    pub(crate) fn append(&mut self, other: &mut Registry) {
        self.entries.append(&mut other.entries);
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use rusty_ecs_macros::System;

    use super::*;

    #[derive(System, Debug, PartialEq)]
    struct Gravity(f32);

    #[derive(System, Debug, PartialEq)]
    struct Render;

    #[test]
    fn add_then_contains() {
        // Given
        let mut registry = Registry::new();

        // When
        registry.add(Gravity(9.8));

        // Then
        assert!(registry.contains::<Gravity>());
        assert!(!registry.contains::<Render>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_returns_first_match() {
        // Given
        let mut registry = Registry::new();
        registry.add(Render);
        registry.add(Gravity(1.0));
        registry.add(Gravity(2.0));

        // Then
        assert_eq!(registry.get::<Gravity>(), Some(&Gravity(1.0)));
        assert_eq!(registry.get::<Render>(), Some(&Render));
    }

    #[test]
    fn get_mut_modifies_system() {
        let mut registry = Registry::new();
        registry.add(Gravity(1.0));

        registry.get_mut::<Gravity>().unwrap().0 = 3.0;

        assert_eq!(registry.get::<Gravity>(), Some(&Gravity(3.0)));
    }

    #[test]
    fn remove_first_match_keeps_order() {
        // Given
        let mut registry = Registry::new();
        registry.add(Gravity(1.0));
        registry.add(Render);
        registry.add(Gravity(2.0));

        // When
        let removed = registry.remove::<Gravity>();

        // Then - The first Gravity is gone, the second remains after Render
        assert_eq!(removed, Some(Gravity(1.0)));
        assert!(registry.contains::<Gravity>());
        assert_eq!(registry.get::<Gravity>(), Some(&Gravity(2.0)));
        let names: Vec<_> = registry.names().collect();
        assert!(names[0].ends_with("Render"));
        assert!(names[1].ends_with("Gravity"));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut registry = Registry::new();
        registry.add(Render);

        assert_eq!(registry.remove::<Gravity>(), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_single_instance_clears_type() {
        let mut registry = Registry::new();
        registry.add(Render);

        registry.remove::<Render>();

        assert!(!registry.contains::<Render>());
        assert!(registry.is_empty());
    }
}
