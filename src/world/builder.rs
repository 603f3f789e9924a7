//! Arena construction from data.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::arena::ArenaConfig;
use super::camera::spawn_camera;
use super::query::{collision_groups, layers};
use crate::combat::WeaponsConfig;
use crate::game::{exit_zone_color, ExitZone};
use crate::pickups::spawn_item;
use crate::player::{spawn_player, PlayerConfig};

/// Marker for static arena geometry.
#[derive(Component)]
pub struct ArenaGeometry;

const FLOOR_COLOR: Color = Color::srgb(0.16, 0.17, 0.15);
const WALL_COLOR: Color = Color::srgb(0.22, 0.2, 0.2);

/// Build the arena, the player and the camera.
pub fn build_arena(
    mut commands: Commands,
    arena: Res<ArenaConfig>,
    player_config: Res<PlayerConfig>,
    weapons: Res<WeaponsConfig>,
) {
    let bounds = arena.bounds.rect();
    info!(
        "Building arena {}x{} with {} obstacles",
        bounds.width(),
        bounds.height(),
        arena.obstacles.len()
    );

    commands.spawn((
        ArenaGeometry,
        Name::new("Floor"),
        Sprite {
            color: FLOOR_COLOR,
            custom_size: Some(bounds.size()),
            ..default()
        },
        Transform::from_translation(bounds.center().extend(0.0)),
    ));

    for (center, size) in arena.boundary_walls() {
        spawn_block(&mut commands, center, size, WALL_COLOR);
    }

    for obstacle in &arena.obstacles {
        let (r, g, b) = obstacle.color;
        spawn_block(
            &mut commands,
            Vec2::new(obstacle.center.0, obstacle.center.1),
            Vec2::new(obstacle.size.0, obstacle.size.1),
            Color::srgb(r, g, b),
        );
    }

    let exit = arena.exit.rect();
    commands.spawn((
        ArenaGeometry,
        Name::new("Exit"),
        ExitZone::new(exit),
        Sprite {
            color: exit_zone_color(false),
            custom_size: Some(exit.size()),
            ..default()
        },
        Transform::from_translation(exit.center().extend(0.2)),
        Collider::cuboid(exit.half_size().x, exit.half_size().y),
        Sensor,
        collision_groups(layers::OBSTACLE),
    ));

    for placement in &arena.items {
        spawn_item(
            &mut commands,
            placement.item,
            Vec2::new(placement.position.0, placement.position.1),
            placement.pickup_range,
        );
    }

    let spawn = arena.player_spawn();
    spawn_player(&mut commands, spawn, &player_config, &weapons);
    spawn_camera(&mut commands, spawn);
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        ArenaGeometry,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.4)),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        collision_groups(layers::OBSTACLE),
    ));
}
