//! World plugin - arena data, construction and the camera.

use bevy::prelude::*;

use super::arena::{ArenaConfig, ARENA_PATH};
use super::builder::build_arena;
use super::camera::{follow_player, update_camera_view, CameraView};
use crate::core::{load_or_default, GameState, GameplaySet};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaConfig>()
            .init_resource::<CameraView>()
            .add_systems(Startup, load_arena)
            .add_systems(OnExit(GameState::Loading), build_arena)
            .add_systems(
                Update,
                (follow_player, update_camera_view)
                    .chain()
                    .after(GameplaySet::Match),
            );
    }
}

fn load_arena(mut commands: Commands) {
    let arena: ArenaConfig = load_or_default(ARENA_PATH);
    if arena.exit.rect().is_empty() {
        warn!("{} has an empty exit zone; the match can only be lost", ARENA_PATH);
    }
    commands.insert_resource(arena);
}
