//! Log plumbing for hosts embedding the ECS.
//!
//! The library only emits records through the `log` facade and never installs a logger itself.

mod channel;

pub use channel::{ChannelLogger, LogMessage};
