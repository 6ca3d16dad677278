use crate::ecs::entity::Entity;

/// A block-based sparse map from entity handles to values.
///
/// The entity id space is divided into fixed-size blocks, and memory is only allocated for blocks
/// that hold at least one entry. Within a block, slots are addressed directly by
/// `entity.index() % block_size`, giving O(1) insert, lookup and removal.
///
/// Each slot also remembers the full handle it was inserted with, so a lookup with a stale handle
/// (same id, older generation) misses instead of returning the newer entity's value.
///
/// | Operation | Time | Memory |
/// |-----------|------|--------|
/// | `insert()` | O(1) amortized | Allocates block on first use |
/// | `get()` | O(1) | No allocation |
/// | `remove()` | O(1) | No deallocation (leaves `None`) |
///
/// # Block Size Tuning
///
/// - **Small blocks (64-128)**: Lower memory overhead for very sparse ids, more indirection
/// - **Default (256)**: Balanced for typical entity creation patterns
/// - **Large blocks (512-1024)**: Better cache locality for dense ids, higher memory overhead
#[derive(Debug)]
pub struct SparseIndex<V> {
    /// The size of blocks to allocate when growing the index.
    block_size: usize,

    /// Outer Vec is indexed by `id / block_size`, inner Vec by `id % block_size`.
    blocks: Vec<Option<Vec<Option<(Entity, V)>>>>,

    /// Number of occupied slots.
    len: usize,
}

impl<V> SparseIndex<V> {
    /// Default block size balances memory usage and access speed for typical entity patterns.
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Create a new index with the default block size.
    #[inline]
    pub const fn new() -> Self {
        Self::with_block_size(Self::DEFAULT_BLOCK_SIZE)
    }

    /// Create a new index with a custom block size.
    ///
    /// # Panics
    ///
    /// Debug builds panic if block_size is 0.
    #[inline]
    pub const fn with_block_size(block_size: usize) -> Self {
        debug_assert!(block_size > 0, "block_size must be greater than 0");
        Self {
            block_size,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Calculate block and within-block indices for an entity.
    #[inline]
    fn indices(&self, entity: Entity) -> (usize, usize) {
        let index = entity.index();
        (index / self.block_size, index % self.block_size)
    }

    fn slot(&self, entity: Entity) -> Option<&(Entity, V)> {
        let (block, within) = self.indices(entity);
        self.blocks
            .get(block)?
            .as_ref()?
            .get(within)?
            .as_ref()
            .filter(|(stored, _)| *stored == entity)
    }

    fn slot_mut(&mut self, entity: Entity) -> Option<&mut Option<(Entity, V)>> {
        let (block, within) = self.indices(entity);
        self.blocks.get_mut(block)?.as_mut()?.get_mut(within)
    }

    /// Insert a value for the entity, returning the previous occupant of its slot.
    ///
    /// The occupant is either the same handle or a stale handle of the same id; callers that track
    /// the evicted handle elsewhere must compare it with `entity`.
    pub fn insert(&mut self, entity: Entity, value: V) -> Option<(Entity, V)> {
        let (block, within) = self.indices(entity);

        // Ensure the blocks vector has enough blocks
        if block >= self.blocks.len() {
            self.blocks.resize_with(block + 1, || None);
        }

        let block_size = self.block_size;
        let slots = self.blocks[block].get_or_insert_with(|| {
            let mut slots = Vec::with_capacity(block_size);
            slots.resize_with(block_size, || None);
            slots
        });

        let previous = slots[within].replace((entity, value));
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Get the value for the given entity if it exists.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&V> {
        self.slot(entity).map(|(_, value)| value)
    }

    /// Get a mutable reference to the value for the given entity if it exists.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut V> {
        match self.slot_mut(entity)? {
            Some((stored, value)) if *stored == entity => Some(value),
            _ => None,
        }
    }

    /// Remove the value for the given entity, returning it if it existed.
    pub fn remove(&mut self, entity: Entity) -> Option<V> {
        let slot = self.slot_mut(entity)?;
        if !matches!(slot, Some((stored, _)) if *stored == entity) {
            return None;
        }
        let (_, value) = slot.take()?;
        self.len -= 1;
        Some(value)
    }

    /// Check if the index holds a value for the given entity.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// The number of entries in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of blocks (including unallocated slots).
    ///
    /// Useful for debugging and memory profiling.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the number of blocks that have been allocated.
    pub fn allocated_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }
}

impl<V> Default for SparseIndex<V> {
    /// Custom default to ensure we get the default block size.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::ecs::entity::{Entity, Generation, Id};

    use super::*;

    fn entity(id: u32) -> Entity {
        Entity::new(id)
    }

    #[test]
    fn single_block() {
        // Given
        let mut index = SparseIndex::with_block_size(10);

        // When
        index.insert(entity(0), 10);
        index.insert(entity(5), 40);
        index.insert(entity(9), 80);

        // Then
        assert_eq!(index.block_count(), 1);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(entity(0)), Some(&10));
        assert_eq!(index.get(entity(1)), None);
        assert_eq!(index.get(entity(5)), Some(&40));
        assert_eq!(index.get(entity(9)), Some(&80));
    }

    #[test]
    fn block_skipping() {
        // Given
        let mut index = SparseIndex::with_block_size(4);

        // When
        index.insert(entity(0), 'a');
        index.insert(entity(9), 'b');

        // Then - Grows to 3 blocks with the middle block left unallocated
        assert_eq!(index.block_count(), 3);
        assert_eq!(index.allocated_block_count(), 2);
        assert!(index.blocks[1].is_none());
        assert_eq!(index.get(entity(5)), None);
    }

    #[test]
    fn insert_replaces_same_handle() {
        let mut index = SparseIndex::new();
        assert_eq!(index.insert(entity(3), 1), None);
        assert_eq!(index.insert(entity(3), 2), Some((entity(3), 1)));
        assert_eq!(index.get(entity(3)), Some(&2));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove() {
        // Given
        let mut index = SparseIndex::new();
        index.insert(entity(0), 100);
        index.insert(entity(1), 200);

        // When
        let removed = index.remove(entity(0));

        // Then
        assert_eq!(removed, Some(100));
        assert!(!index.contains(entity(0)));
        assert!(index.contains(entity(1)));
        assert_eq!(index.len(), 1);

        // Removing a missing or out-of-range entry is a no-op
        assert_eq!(index.remove(entity(0)), None);
        assert_eq!(index.remove(entity(100_000)), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn stale_generation_misses() {
        // Given
        let old = entity(2);
        let new = Entity::new_with_generation(Id::from(2), Generation::FIRST.next());
        let mut index = SparseIndex::new();
        index.insert(old, "old");

        // Then - The newer handle does not see the old value
        assert_eq!(index.get(new), None);
        assert_eq!(index.remove(new), None);

        // When - The newer handle takes over the slot and evicts the old one
        assert_eq!(index.insert(new, "new"), Some((old, "old")));

        // Then
        assert_eq!(index.get(old), None);
        assert_eq!(index.get_mut(new).map(|v| *v), Some("new"));
        assert_eq!(index.len(), 1);
    }
}
