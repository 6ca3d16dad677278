use std::{
    any::TypeId,
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;

use crate::ecs::component::{Component, Id, Info};

/// A thread-safe component registry. This is responsible for assigning component types their
/// identifiers.
///
/// The registry uses lock-free reads for TypeId→Info lookups via `DashMap`. Registration only
/// locks a single shard of the map.
///
/// Why thread-safe?
/// - A world itself is confined to one thread, but several worlds may share one registry (through
///   an `Arc`) so that they all agree on component ids.
#[derive(Debug)]
pub struct Registry {
    /// Map from TypeId to component info.
    type_map: DashMap<TypeId, Info>,

    /// Reverse map from component id to component info.
    infos: DashMap<Id, Info>,

    /// Next available component identifier.
    next_id: AtomicU32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new component registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            type_map: DashMap::new(),
            infos: DashMap::new(),
            next_id: AtomicU32::new(0),
        }
    }

    /// Register a component type and get its identifier.
    ///
    /// Registration is idempotent: registering a type twice returns the same id. This method is
    /// safe to call concurrently.
    pub fn register<C: Component>(&self) -> Id {
        let type_id = TypeId::of::<C>();

        // Fast path: already registered (lock-free read)
        if let Some(info) = self.type_map.get(&type_id) {
            return info.id();
        }

        // Slow path: the entry API keeps two racing threads from both allocating an id.
        self.type_map
            .entry(type_id)
            .or_insert_with(|| {
                let id = Id(self.next_id.fetch_add(1, Ordering::Relaxed));
                let info = Info::new::<C>(id);
                self.infos.insert(id, info);
                log::trace!("registered component {} as {:?}", info.name(), id);
                info
            })
            .id()
    }

    /// Get the id for a component type, if it has been registered.
    #[inline]
    pub fn get<C: Component>(&self) -> Option<Id> {
        self.type_map
            .get(&TypeId::of::<C>())
            .map(|info| info.id())
    }

    /// Get the info for a registered component id.
    #[inline]
    pub fn info(&self, id: Id) -> Option<Info> {
        self.infos.get(&id).map(|info| *info)
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_map.len()
    }

    /// Returns `true` if no component types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use rusty_ecs_macros::Component;

    use super::*;

    #[derive(Component)]
    struct Position;

    #[derive(Component)]
    struct Velocity;

    #[test]
    fn register_assigns_dense_ids() {
        // Given
        let registry = Registry::new();

        // When
        let pos = registry.register::<Position>();
        let vel = registry.register::<Velocity>();

        // Then
        assert_eq!(pos, Id(0));
        assert_eq!(vel, Id(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn register_is_idempotent() {
        // Given
        let registry = Registry::new();
        let first = registry.register::<Position>();

        // When
        let second = registry.register::<Position>();

        // Then
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_unregistered_is_none() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get::<Position>(), None);
        assert!(registry.info(Id(0)).is_none());
    }

    #[test]
    fn info_round_trips_id() {
        // Given
        let registry = Registry::new();
        let id = registry.register::<Velocity>();

        // When
        let info = registry.info(id).unwrap();

        // Then
        assert_eq!(info.id(), id);
        assert_eq!(info.type_id(), TypeId::of::<Velocity>());
        assert!(info.name().ends_with("Velocity"));
    }

    #[test]
    fn concurrent_registration_agrees() {
        // Given
        let registry = Arc::new(Registry::new());

        // When - Many threads race to register the same types
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    (
                        registry.register::<Position>(),
                        registry.register::<Velocity>(),
                    )
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Then - Every thread saw the same ids, and only two were allocated
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(registry.len(), 2);
    }
}
