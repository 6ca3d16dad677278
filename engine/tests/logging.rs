use std::time::Duration;

use log::Level;
use rusty_ecs::{ecs::World, logging::ChannelLogger};

#[test]
fn destroying_dead_entity_warns() {
    // Given
    let (logger, receiver) = ChannelLogger::with_receiver();
    logger.install().unwrap();

    let mut world = World::default();
    let entity = world.create_entity();
    world.destroy_entity(entity);

    // When
    world.destroy_entity(entity);

    // Then
    let warning = receiver
        .recv_timeout(Duration::from_secs(1))
        .expect("expected a warning");
    assert_eq!(warning.level, Level::Warn);
    assert!(warning.message.contains("not live"));
    assert!(warning.target.starts_with("rusty_ecs"));
}
