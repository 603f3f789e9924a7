//! Combat systems - firing, swings, flames, projectiles and damage.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use super::components::*;
use super::flamethrower::cone_rays;
use super::knockback::Knockback;
use super::melee::SwingPhase;
use super::projectile::{Contact, Projectile, ProjectileStep};
use super::weapons::{FireAction, Loadout, Trigger, WeaponData, WeaponKind};
use crate::core::{
    ActorCue, ActorCueEvent, GameplaySet, HealthChangedEvent, InputSnapshot, PlaySoundEvent,
    SoundClip, WeaponSwitchedEvent,
};
use crate::player::Player;
use crate::world::{layers, QueryMask, RapierSpatialQuery, SpatialQuery};
use crate::zombies::Zombie;

/// Distance from the player's center to the muzzle.
const MUZZLE_OFFSET: f32 = 0.6;
const BULLET_SIZE: Vec2 = Vec2::new(0.3, 0.08);

/// Marker for the sprite showing the player's active weapon.
#[derive(Component)]
pub struct HeldWeapon;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Weapon selection happens before anything fires
        .add_systems(Update, switch_weapon.in_set(GameplaySet::Input))

        // Attacks produce DamageEvents
        .add_systems(
            Update,
            (fire_weapon, swing_melee, burn_flame, move_projectiles)
                .chain()
                .in_set(GameplaySet::Act),
        )

        // Single place where health changes
        .add_systems(Update, apply_damage.in_set(GameplaySet::Resolve))

        // Consequences of hits
        .add_systems(
            Update,
            (apply_knockback, emit_damage_cues, sync_held_weapon).in_set(GameplaySet::React),
        );
}

/// Switch to the slot requested this tick.
fn switch_weapon(
    input: Res<InputSnapshot>,
    mut player_query: Query<(Entity, &mut Loadout), (With<Player>, Without<Dead>)>,
    mut switched_events: EventWriter<WeaponSwitchedEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    let Some(slot) = input.switch_weapon else {
        return;
    };
    let Ok((entity, mut loadout)) = player_query.get_single_mut() else {
        return;
    };

    let Some(switch) = loadout.switch_to(slot) else {
        debug!("No weapon in slot {}", slot + 1);
        return;
    };

    if switch.swing_cancelled || switch.flame_stopped {
        cue_events.send(ActorCueEvent {
            entity,
            cue: ActorCue::AttackStopped,
        });
    }
    switched_events.send(WeaponSwitchedEvent {
        previous: Some(switch.previous),
        current: switch.current,
    });
}

/// Pull the trigger of the active weapon.
fn fire_weapon(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<InputSnapshot>,
    mut player_query: Query<(Entity, &Transform, &Player, &mut Loadout), Without<Dead>>,
    mut sound_events: EventWriter<PlaySoundEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    let Ok((entity, transform, player, mut loadout)) = player_query.get_single_mut() else {
        return;
    };

    let origin = transform.translation.truncate();
    let trigger = Trigger {
        pressed: input.fire_pressed,
        held: input.fire_held,
    };
    let sound = loadout.current_weapon().and_then(|weapon| weapon.sound.clone());

    match loadout.try_fire(time.elapsed_secs(), player.aim, trigger) {
        FireAction::Shot(shot) => {
            commands.spawn((
                Projectile::new(shot.direction, shot.speed, shot.damage, shot.lifetime, Some(entity)),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(BULLET_SIZE),
                    ..default()
                },
                Transform::from_translation((origin + shot.direction * MUZZLE_OFFSET).extend(3.0))
                    .with_rotation(Quat::from_rotation_z(shot.direction.to_angle())),
            ));

            if let Some(clip) = sound {
                let volume = rand::thread_rng().gen_range(0.08..=0.12);
                sound_events.send(PlaySoundEvent::new(SoundClip::Weapon(clip), volume));
            }
        }
        FireAction::SwingStarted => {
            if let Some(clip) = sound {
                sound_events.send(PlaySoundEvent::new(SoundClip::Weapon(clip), 1.0));
            }
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::AttackStarted,
            });
        }
        FireAction::FlameIgnited => {
            sound_events.send(PlaySoundEvent::new(SoundClip::FlameIgnite, 0.8));
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::AttackStarted,
            });
        }
        FireAction::FlameStopped => {
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::AttackStopped,
            });
        }
        FireAction::None => {}
    }
}

/// Advance the melee swing and hit zombies the blade sweeps over.
fn swing_melee(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(Entity, &Transform, &Player, &mut Loadout), Without<Dead>>,
    zombie_query: Query<&Transform, (With<Zombie>, Without<Dead>, Without<Player>)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    let Ok((entity, transform, player, mut loadout)) = player_query.get_single_mut() else {
        return;
    };

    let blade = loadout.current_weapon().and_then(|weapon| match weapon.kind {
        WeaponKind::Melee {
            reach,
            knockback_duration,
            ..
        } => Some((reach, knockback_duration, weapon.damage, weapon.knockback)),
        _ => None,
    });

    let Some(frame) = loadout.advance(time.delta_secs(), player.aim) else {
        return;
    };
    if frame.phase == SwingPhase::Finished {
        cue_events.send(ActorCueEvent {
            entity,
            cue: ActorCue::AttackStopped,
        });
        return;
    }

    let Some((reach, knockback_duration, damage, force)) = blade else {
        return;
    };
    if frame.phase != SwingPhase::Active {
        return;
    }
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    // Circle covering the blade from the hilt to its tip
    let origin = transform.translation.truncate();
    let center = origin + frame.blade_direction() * reach * 0.5;
    let world = RapierSpatialQuery::new(context);
    let touched = world.overlap_circle(
        center,
        reach * 0.5,
        QueryMask::new(layers::ZOMBIE).solids().excluding(entity),
    );

    let Some(swing) = loadout.swing_mut() else {
        return;
    };
    for target in touched {
        let Ok(target_transform) = zombie_query.get(target) else {
            continue;
        };
        if !swing.register_hit(target) {
            continue;
        }

        let direction = (target_transform.translation.truncate() - origin).normalize_or_zero();
        damage_events.send(DamageEvent {
            target,
            source: Some(entity),
            amount: damage,
            knockback: (force > 0.0).then_some(Impulse {
                direction,
                force,
                duration: knockback_duration,
            }),
        });
    }
}

/// Cast the flame cone on every pulse while the flamethrower burns.
fn burn_flame(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(Entity, &Transform, &Player, &mut Loadout), Without<Dead>>,
    zombie_query: Query<(), (With<Zombie>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((entity, transform, player, mut loadout)) = player_query.get_single_mut() else {
        return;
    };
    if !loadout.flame_pulse_due(time.elapsed_secs()) {
        return;
    }

    let Some(WeaponData {
        kind:
            WeaponKind::Flamethrower {
                range,
                spread_degrees,
                ray_count,
                ..
            },
        damage,
        ..
    }) = loadout.current_weapon()
    else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let world = RapierSpatialQuery::new(context);
    let muzzle = transform.translation.truncate() + player.aim * MUZZLE_OFFSET;
    let mask = QueryMask::new(layers::ZOMBIE | layers::OBSTACLE)
        .solids()
        .excluding(entity);

    for ray in cone_rays(player.aim, *spread_degrees, *ray_count) {
        let Some(hit) = world.raycast(muzzle, ray, *range, mask) else {
            continue;
        };
        if zombie_query.get(hit.entity).is_ok() {
            damage_events.send(DamageEvent {
                target: hit.entity,
                source: Some(entity),
                amount: *damage,
                knockback: None,
            });
        }
    }
}

/// Move bullets and resolve what they run into.
fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut projectile_query: Query<(Entity, &mut Transform, &mut Projectile)>,
    zombie_query: Query<Has<Dead>, With<Zombie>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let dt = time.delta_secs();

    // Living zombies take the hit, corpses are ignored, anything else blocks
    let classify = |hit: Entity| match zombie_query.get(hit) {
        Ok(false) => Contact::Damage,
        Ok(true) => Contact::Ignore,
        Err(_) => Contact::Block,
    };

    for (entity, mut transform, mut projectile) in projectile_query.iter_mut() {
        let position = transform.translation.truncate();
        match projectile.step(position, dt, &world, classify) {
            ProjectileStep::Travel(next) => {
                transform.translation = next.extend(transform.translation.z);
            }
            ProjectileStep::Struck(target) => {
                damage_events.send(DamageEvent {
                    target,
                    source: projectile.owner,
                    amount: projectile.damage,
                    knockback: None,
                });
                commands.entity(entity).despawn();
            }
            ProjectileStep::Blocked | ProjectileStep::Expired => {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<&mut Health, Without<Dead>>,
    mut hit_events: EventWriter<HitEvent>,
    mut health_events: EventWriter<HealthChangedEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };
        let Some(report) = health.apply_damage(event.amount) else {
            continue;
        };

        health_events.send(HealthChangedEvent {
            entity: event.target,
            current: report.current,
            maximum: health.maximum(),
        });
        hit_events.send(HitEvent {
            entity: event.target,
            source: event.source,
            amount: event.amount,
            lethal: report.died,
            knockback: event.knockback,
        });

        if report.died {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
        }
    }
}

/// Start knockback on entities that survived a pushing hit.
fn apply_knockback(
    mut hit_events: EventReader<HitEvent>,
    mut knockback_query: Query<&mut Knockback, Without<Dead>>,
) {
    for event in hit_events.read() {
        let Some(impulse) = event.knockback else {
            continue;
        };
        if event.lethal {
            continue;
        }
        if let Ok(mut knockback) = knockback_query.get_mut(event.entity) {
            knockback.apply(impulse);
        }
    }
}

/// Tell presentation about hurt and dead actors.
fn emit_damage_cues(
    mut hit_events: EventReader<HitEvent>,
    mut death_events: EventReader<DeathEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    for event in hit_events.read() {
        if event.amount > 0 && !event.lethal {
            cue_events.send(ActorCueEvent {
                entity: event.entity,
                cue: ActorCue::Damaged,
            });
        }
    }
    for event in death_events.read() {
        cue_events.send(ActorCueEvent {
            entity: event.entity,
            cue: ActorCue::Died,
        });
    }
}

/// Point the held weapon sprite along the loadout's weapon angle.
fn sync_held_weapon(
    player_query: Query<(&Loadout, &Children), With<Player>>,
    mut weapon_query: Query<&mut Transform, With<HeldWeapon>>,
) {
    for (loadout, children) in player_query.iter() {
        let rotation = Quat::from_rotation_z(loadout.weapon_angle().to_radians());
        for child in children.iter() {
            if let Ok(mut transform) = weapon_query.get_mut(*child) {
                transform.rotation = rotation;
                transform.translation = (rotation * Vec3::X * MUZZLE_OFFSET * 0.5).with_z(0.1);
            }
        }
    }
}
