pub mod component;
pub mod entity;
pub mod error;
pub mod storage;
pub mod system;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use error::Error;
pub use system::System;
pub use world::{Id as WorldId, World};
