//! Drives a world through long random sequences of structural edits and checks after every step
//! that the live-entity list, the component bags and the type index still agree.

use std::collections::HashMap;

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Component, Entity, World};
use rusty_ecs_macros::Component;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct A(u32);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct B(u32);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct C(u32);

/// What the world should contain, kept with plain collections.
#[derive(Default)]
struct Model {
    live: Vec<Entity>,
    a: Vec<(Entity, u32)>,
    b: Vec<(Entity, u32)>,
    c: Vec<(Entity, u32)>,
}

impl Model {
    fn attach(bucket: &mut Vec<(Entity, u32)>, entity: Entity, value: u32) {
        match bucket.iter_mut().find(|(e, _)| *e == entity) {
            Some(slot) => slot.1 = value,
            None => bucket.push((entity, value)),
        }
    }

    fn detach(bucket: &mut Vec<(Entity, u32)>, entity: Entity) {
        bucket.retain(|(e, _)| *e != entity);
    }
}

fn check_bucket<T: Component + Copy + PartialEq + std::fmt::Debug>(
    world: &World,
    expected: &[(Entity, u32)],
    wrap: fn(u32) -> T,
) {
    let entities = world.entities_by_type::<T>().to_vec();
    let components: Vec<T> = world.components_by_type::<T>().copied().collect();

    assert_eq!(entities.len(), components.len());
    assert_eq!(
        entities,
        expected.iter().map(|(e, _)| *e).collect::<Vec<_>>()
    );
    assert_eq!(
        components,
        expected.iter().map(|(_, v)| wrap(*v)).collect::<Vec<_>>()
    );
    for (entity, value) in expected {
        assert!(world.has_component::<T>(*entity));
        assert_eq!(world.get_component::<T>(*entity), Some(&wrap(*value)));
    }
}

fn check(world: &World, model: &Model) {
    assert_eq!(world.entities().collect::<Vec<_>>(), model.live);
    check_bucket(world, &model.a, A);
    check_bucket(world, &model.b, B);
    check_bucket(world, &model.c, C);
}

fn run(seed: u64, steps: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::default();
    let mut model = Model::default();
    let mut dead = Vec::new();

    for _ in 0..steps {
        let op = rng.gen_range(0..10);
        let target = model.live.choose(&mut rng).copied();
        let value = rng.r#gen::<u32>();

        match (op, target) {
            (0 | 1, _) | (_, None) => {
                model.live.push(world.create_entity());
            }
            (2, Some(entity)) => {
                assert!(world.destroy_entity(entity));
                model.live.retain(|e| *e != entity);
                Model::detach(&mut model.a, entity);
                Model::detach(&mut model.b, entity);
                Model::detach(&mut model.c, entity);
                dead.push(entity);
            }
            (3, Some(entity)) => {
                world.attach_component(entity, A(value)).unwrap();
                Model::attach(&mut model.a, entity, value);
            }
            (4, Some(entity)) => {
                world.attach_component(entity, B(value)).unwrap();
                Model::attach(&mut model.b, entity, value);
            }
            (5, Some(entity)) => {
                world.attach_component(entity, C(value)).unwrap();
                Model::attach(&mut model.c, entity, value);
            }
            (6, Some(entity)) => {
                world.detach_component::<A>(entity);
                Model::detach(&mut model.a, entity);
            }
            (7, Some(entity)) => {
                world.detach_component::<B>(entity);
                Model::detach(&mut model.b, entity);
            }
            (8, Some(entity)) => {
                world.detach_component::<C>(entity);
                Model::detach(&mut model.c, entity);
            }
            (_, Some(_)) => {
                // Stale handles must be rejected without touching anything.
                if let Some(stale) = dead.choose(&mut rng).copied() {
                    assert!(!world.has_entity(stale));
                    assert!(!world.destroy_entity(stale));
                    assert!(world.attach_component(stale, A(value)).is_err());
                    assert!(world.detach_component::<B>(stale).is_none());
                }
            }
        }

        check(&world, &model);
    }
}

#[test]
fn random_edit_sequences_stay_consistent() {
    for seed in 0..8 {
        run(seed, 500);
    }
}
