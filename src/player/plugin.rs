//! Player plugin - movement, aiming, infection.

use bevy::prelude::*;

use super::components::*;
use super::infection;
use super::movement;
use crate::core::load_or_default;

/// Path of the player tunables.
pub const PLAYER_PATH: &str = "assets/data/player.ron";

/// Player plugin - handles player movement and infection.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Initialize resources
        app.init_resource::<PlayerConfig>()
            .add_systems(Startup, load_player_config);

        // Set up movement and infection systems
        movement::setup_movement_systems(app);
        infection::setup_infection_systems(app);
    }
}

fn load_player_config(mut commands: Commands) {
    let config: PlayerConfig = load_or_default(PLAYER_PATH);
    commands.insert_resource(config);
}
