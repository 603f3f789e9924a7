//! Zombie entity spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::brain::ZombieBrain;
use super::components::{Zombie, ZombieArchetype};
use super::data::ZombieDefinition;
use crate::combat::{Facing, Health, Knockback};
use crate::world::{character_controller, collision_groups, layers};

/// Spawn a zombie of `archetype` at `position`.
pub fn spawn_zombie(
    commands: &mut Commands,
    archetype: &str,
    definition: &ZombieDefinition,
    position: Vec2,
) -> Entity {
    let stats = definition.to_stats();
    let brain = ZombieBrain::new(&stats);
    let (r, g, b) = definition.tint;

    commands
        .spawn((
            Zombie,
            ZombieArchetype(archetype.to_string()),
            stats,
            brain,
            Facing::default(),
            Health::new(definition.max_health),
            Knockback::default(),
            Sprite {
                color: Color::srgb(r, g, b),
                custom_size: Some(Vec2::splat(definition.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            RigidBody::KinematicPositionBased,
            Collider::ball(definition.radius),
            collision_groups(layers::ZOMBIE),
            character_controller(),
        ))
        .id()
}
