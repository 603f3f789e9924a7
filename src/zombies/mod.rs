//! Zombies module - archetypes, AI state machine, alerting and spawning.

mod ai;
pub mod alert;
pub mod brain;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use brain::{AiState, BrainOutput, Perception, ZombieBrain};
pub use components::*;
pub use data::{ZombieDefinition, ZombieRegistry};
pub use plugin::ZombiePlugin;
pub use spawning::spawn_zombie;
