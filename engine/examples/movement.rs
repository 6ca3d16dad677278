//! A tiny fixed-step simulation driving a world from the outside.
//!
//! Run with `cargo run -p rusty_ecs --example movement`.

use rusty_ecs::ecs::{
    System,
    world::{self, World},
};
use rusty_ecs_macros::Component;

const STEPS: usize = 5;

#[derive(Component, Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, Copy)]
struct Velocity {
    dx: f32,
    dy: f32,
}

/// Marks entities that should be destroyed once they leave the arena.
#[derive(Component)]
struct Bounded;

/// Integrates velocity into position.
struct Movement;

impl System for Movement {
    fn update(&mut self, world: &mut World) {
        let movers = world.entities_by_type::<Velocity>().to_vec();
        for entity in movers {
            let Some(&Velocity { dx, dy }) = world.get_component::<Velocity>(entity) else {
                continue;
            };
            if let Some(pos) = world.get_component_mut::<Position>(entity) {
                pos.x += dx;
                pos.y += dy;
            }
        }
    }
}

/// Destroys bounded entities that wandered past `limit`.
struct Arena {
    limit: f32,
    destroyed: usize,
}

impl System for Arena {
    fn update(&mut self, world: &mut World) {
        let bounded = world.entities_by_type::<Bounded>().to_vec();
        for entity in bounded {
            let outside = world
                .get_component::<Position>(entity)
                .is_some_and(|pos| pos.x.abs() > self.limit || pos.y.abs() > self.limit);
            if outside && world.destroy_entity(entity) {
                self.destroyed += 1;
            }
        }
    }
}

fn main() -> Result<(), rusty_ecs::ecs::Error> {
    let mut world = World::new(world::Id::new(1));

    for i in 0..4 {
        let entity = world.create_entity();
        world.attach_component(entity, Position { x: 0.0, y: 0.0 })?;
        world.attach_component(
            entity,
            Velocity {
                dx: i as f32,
                dy: 1.0,
            },
        )?;
        if i % 2 == 0 {
            world.attach_component(entity, Bounded)?;
        }
    }

    // A static entity that never moves.
    let anchor = world.create_entity();
    world.attach_component(anchor, Position { x: 10.0, y: 10.0 })?;

    world.add_system(Movement);
    world.add_system(Arena {
        limit: 3.0,
        destroyed: 0,
    });

    for step in 0..STEPS {
        world.update()?;
        println!("step {step}: {} entities", world.entity_count());
        for (entity, pos) in world
            .entities_by_type::<Position>()
            .iter()
            .zip(world.components_by_type::<Position>())
        {
            println!("  {entity:?} at ({:.1}, {:.1})", pos.x, pos.y);
        }
    }

    if let Some(arena) = world.get_system::<Arena>() {
        println!("arena destroyed {} entities", arena.destroyed);
    }
    Ok(())
}
