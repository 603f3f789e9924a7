//! Top-down player movement, aiming and spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::{Dead, Facing, Health, HeldWeapon, Knockback, Loadout, WeaponsConfig};
use crate::core::{ActorCue, ActorCueEvent, GameplaySet, InputSnapshot};
use crate::world::{character_controller, collision_groups, layers};

const PLAYER_COLOR: Color = Color::srgb(0.35, 0.6, 1.0);
const WEAPON_COLOR: Color = Color::srgb(0.55, 0.55, 0.6);

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(Update, player_movement.in_set(GameplaySet::Input));
}

/// Steer the player from the input snapshot.
///
/// Uses Rapier's KinematicCharacterController so obstacles block movement.
/// While knocked back the player only drifts with the push.
pub fn player_movement(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut Player,
            &mut Facing,
            &mut Knockback,
            &mut KinematicCharacterController,
        ),
        Without<Dead>,
    >,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    let Ok((entity, transform, mut player, mut facing, mut knockback, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    let origin = transform.translation.truncate();
    if let Some(aim) = input.aim_from(origin) {
        player.aim = aim;
    }
    if let Some(heading) = facing.turn_towards(player.aim) {
        cue_events.send(ActorCueEvent {
            entity,
            cue: ActorCue::DirectionChanged(heading),
        });
    }

    let dt = time.delta_secs();
    let push = knockback.tick(dt);
    let walk = if knockback.is_active() {
        Vec2::ZERO
    } else {
        input.movement * config.move_speed * dt
    };

    controller.translation = Some(walk + push);
}

/// Spawn the player entity with its weapon sprite.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &PlayerConfig,
    weapons: &WeaponsConfig,
) -> Entity {
    commands
        .spawn((
            Player::default(),
            Facing::default(),
            // Combat components
            Health::new(config.max_health),
            Infection::new(config.infection_interval),
            Knockback::default(),
            Loadout::new(weapons.weapons.clone()),
            // Visuals
            Sprite {
                color: PLAYER_COLOR,
                custom_size: Some(Vec2::splat(config.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(2.0)),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::ball(config.radius),
            collision_groups(layers::PLAYER),
            // Walks through trigger zones
            character_controller(),
        ))
        .with_children(|parent| {
            parent.spawn((
                HeldWeapon,
                Sprite {
                    color: WEAPON_COLOR,
                    custom_size: Some(Vec2::new(0.6, 0.12)),
                    ..default()
                },
                Transform::from_xyz(0.3, 0.0, 0.1),
            ));
        })
        .id()
}
