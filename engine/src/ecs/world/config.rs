use std::sync::Arc;

use crate::ecs::{component, storage::SparseIndex};

/// Construction options for a [`World`](super::World).
///
/// ```rust,ignore
/// let shared = Arc::new(component::Registry::new());
/// let config = Config::default()
///     .with_block_size(64)
///     .with_registry(shared.clone());
/// let world = World::with_config(Id::new(1), config);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Block size of the sparse indexes backing entity storage and the type index.
    pub index_block_size: usize,

    /// A component registry shared with other worlds. A private one is created when unset.
    pub registry: Option<Arc<component::Registry>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_block_size: SparseIndex::<()>::DEFAULT_BLOCK_SIZE,
            registry: None,
        }
    }
}

impl Config {
    /// Set the block size of the sparse indexes. Zero is treated as one.
    #[inline]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.index_block_size = block_size.max(1);
        self
    }

    /// Share a component registry with other worlds so component ids agree between them.
    #[inline]
    pub fn with_registry(mut self, registry: Arc<component::Registry>) -> Self {
        self.registry = Some(registry);
        self
    }
}
