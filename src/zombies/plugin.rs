//! Zombie plugin - registers archetype loading and AI systems.

use bevy::prelude::*;

use super::ai;
use super::data::{check_attack_reach, load_zombie_definitions, ZombieRegistry};
use crate::core::{GameState, GameplaySet};

/// Zombie plugin - handles archetypes, AI, alerts, death and corpses.
pub struct ZombiePlugin;

impl Plugin for ZombiePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZombieRegistry>()
            .add_systems(Startup, load_zombie_definitions)
            .add_systems(OnExit(GameState::Loading), check_attack_reach)
            // Decide before anyone attacks this tick
            .add_systems(Update, ai::zombie_think.in_set(GameplaySet::Think))
            .add_systems(
                Update,
                (
                    ai::alert_on_damage,
                    ai::handle_zombie_death,
                    ai::despawn_corpses,
                )
                    .chain()
                    .in_set(GameplaySet::React),
            );
    }
}
