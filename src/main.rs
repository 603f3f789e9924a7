//! Zombie Outbreak - Entry Point
//!
//! Controls:
//! - WASD / arrows: Move
//! - Mouse: Aim
//! - Left mouse: Fire
//! - C: Pick up
//! - 1-9: Switch weapon
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, audio goes through kira instead
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Zombie Outbreak".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(zombie_outbreak::OutbreakPlugin)

        .run();
}
