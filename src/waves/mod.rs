//! Zombie waves: timed spawn batches, difficulty milestones and supply drops.

mod config;
pub mod difficulty;
pub mod placement;
mod plugin;
pub mod preset;
pub mod spawner;
pub mod supply;
mod systems;

pub use config::WavesConfig;
pub use difficulty::{Difficulty, Milestone};
pub use placement::PlacementConfig;
pub use plugin::WavePlugin;
pub use preset::{WavePreset, ZombieChance};
pub use spawner::WaveSpawner;
pub use supply::{SupplyDrop, SupplyDropConfig};
