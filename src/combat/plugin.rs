//! Combat plugin - weapons, projectiles and the damage pipeline.

use bevy::prelude::*;

use super::systems;
use super::weapons::WeaponsConfig;
use crate::core::load_or_default;

/// Path of the player's weapon list.
pub const WEAPONS_PATH: &str = "assets/data/weapons.ron";

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeaponsConfig>()
            .add_systems(Startup, load_weapons);

        // Setup combat systems
        systems::setup_combat_systems(app);
    }
}

/// Read the weapon list, keeping the built-in one if the file is unusable.
fn load_weapons(mut commands: Commands) {
    let config: WeaponsConfig = load_or_default(WEAPONS_PATH);
    if config.weapons.is_empty() {
        warn!("{} lists no weapons; the player will be unarmed", WEAPONS_PATH);
    }
    commands.insert_resource(config);
}
