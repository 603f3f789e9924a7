//! Game plugin - match config loading and the match controller.

use bevy::prelude::*;

use super::state::{MatchConfig, MatchState, MATCH_PATH};
use super::systems::setup_match_systems;
use crate::core::load_or_default;

/// Match controller: clock, kills, win and lose conditions.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchConfig>()
            .init_resource::<MatchState>()
            .add_systems(Startup, load_match_config);

        setup_match_systems(app);
    }
}

fn load_match_config(mut commands: Commands) {
    let config: MatchConfig = load_or_default(MATCH_PATH);
    commands.insert_resource(config);
}
