use std::collections::{BTreeMap, btree_map};

use crate::ecs::{entity::Entity, storage::SparseIndex};

/// An insertion-ordered set of entities.
///
/// Each inserted entity is stamped with a monotonically increasing sequence number. The sequence
/// orders iteration and a sparse index maps the entity back to its stamp, so:
///
/// - `contains` is O(1)
/// - `insert` and `remove` are O(log n)
/// - iteration always yields entities in the order they were (last) inserted, no matter which
///   entities were removed in between
///
/// Inserting an entity that is already present is a no-op; it keeps its original position.
#[derive(Debug)]
pub struct EntitySet {
    /// Entities keyed by insertion sequence.
    order: BTreeMap<u64, Entity>,

    /// The insertion sequence of each member.
    stamps: SparseIndex<u64>,

    /// The next sequence number to hand out.
    next: u64,
}

impl EntitySet {
    /// Create an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self::with_block_size(SparseIndex::<u64>::DEFAULT_BLOCK_SIZE)
    }

    /// Create an empty set whose membership index uses the given block size.
    #[inline]
    pub const fn with_block_size(block_size: usize) -> Self {
        Self {
            order: BTreeMap::new(),
            stamps: SparseIndex::with_block_size(block_size),
            next: 0,
        }
    }

    /// Append the entity to the set. Returns `false` if it was already a member.
    ///
    /// A member with the same id but another generation is evicted.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.stamps.contains(entity) {
            return false;
        }
        let stamp = self.next;
        self.next += 1;
        if let Some((_, evicted)) = self.stamps.insert(entity, stamp) {
            self.order.remove(&evicted);
        }
        self.order.insert(stamp, entity);
        true
    }

    /// Remove the entity from the set. Returns `false` if it was not a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.stamps.remove(entity) {
            Some(stamp) => {
                self.order.remove(&stamp);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.stamps.contains(entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate the members in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.order.values())
    }

    /// Copy the members, in insertion order, into a `Vec`.
    pub fn to_vec(&self) -> Vec<Entity> {
        self.iter().collect()
    }
}

impl Default for EntitySet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = Entity;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of an [`EntitySet`], in insertion order.
#[derive(Clone)]
pub struct Iter<'a>(btree_map::Values<'a, u64, Entity>);

impl Iterator for Iter<'_> {
    type Item = Entity;

    #[inline]
    fn next(&mut self) -> Option<Entity> {
        self.0.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Entity> {
        self.0.next_back().copied()
    }
}

impl ExactSizeIterator for Iter<'_> {}
