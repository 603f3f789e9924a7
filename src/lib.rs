//! Zombie Outbreak - a top-down survival shooter in Bevy.
//!
//! Hold out against waves of zombies until the clock runs out, or reach the
//! exit zone uninfected.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, input snapshot, data loading
//! - **Combat**: Health, weapons, melee swings, flames, projectiles, damage
//! - **Player**: Movement, infection
//! - **Zombies**: Archetypes, AI state machine, alerting, corpses
//! - **Waves**: Timed spawning, difficulty milestones, supply drops
//! - **Pickups**: Vaccines and weapon pickups
//! - **Game**: Match clock, kill count, win and lose conditions
//! - **World**: Arena layout, scene queries, camera
//! - **Audio**: Sound playback
//! - **UI**: HUD and overlays

pub mod audio;
pub mod combat;
pub mod core;
pub mod game;
pub mod pickups;
pub mod player;
pub mod ui;
pub mod waves;
pub mod world;
pub mod zombies;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct OutbreakPlugin;

impl Plugin for OutbreakPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Simulation
            .add_plugins(combat::CombatPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(zombies::ZombiePlugin)
            .add_plugins(waves::WavePlugin)
            .add_plugins(pickups::PickupPlugin)
            .add_plugins(game::GamePlugin)

            // World and presentation
            .add_plugins(world::WorldPlugin)
            .add_plugins(audio::GameAudioPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
