//! Deterministic world setups shared by the benchmarks.

use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Entity, World, world};

use crate::components::{Position, Rotation, Transform, Velocity};

/// Seed used for every shuffled workload so runs are comparable.
pub const SEED: u64 = 0x5eed;

/// Create a world with `count` entities carrying all four bench components.
pub fn populated_world(count: usize) -> (World, Vec<Entity>) {
    let mut world = World::new(world::Id::new(0));
    let mut entities = Vec::with_capacity(count);
    for i in 0..count {
        let entity = world.create_entity();
        world
            .attach_component(
                entity,
                Position {
                    x: i as f32,
                    ..Default::default()
                },
            )
            .expect("live entity");
        world
            .attach_component(entity, Velocity::default())
            .expect("live entity");
        world
            .attach_component(entity, Rotation::default())
            .expect("live entity");
        world
            .attach_component(entity, Transform::default())
            .expect("live entity");
        entities.push(entity);
    }
    (world, entities)
}

/// Shuffle entities with the fixed bench seed.
pub fn shuffled(mut entities: Vec<Entity>) -> Vec<Entity> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    entities.shuffle(&mut rng);
    entities
}
