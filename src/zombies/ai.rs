//! Zombie AI systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::alert::{alert_recipients, AlertCandidate};
use super::brain::{AiState, Perception, ZombieBrain};
use super::components::{DeathTimer, Zombie, ZombieStats};
use crate::combat::{DamageEvent, Damageable, Dead, DeathEvent, Facing, Health, HitEvent, Impulse, Knockback};
use crate::core::{ActorCue, ActorCueEvent, InfectEvent, PlaySoundEvent, SoundClip};
use crate::game::MatchConfig;
use crate::player::{Player, PlayerConfig};

const CORPSE_COLOR: Color = Color::srgb(0.3, 0.22, 0.18);

/// Run every living zombie's brain and carry out what it decides.
pub fn zombie_think(
    time: Res<Time>,
    player_config: Res<PlayerConfig>,
    player_query: Query<(Entity, &Transform, &Health), (With<Player>, Without<Zombie>)>,
    mut zombie_query: Query<
        (
            Entity,
            &Transform,
            &ZombieStats,
            &mut ZombieBrain,
            &mut Facing,
            &mut Knockback,
            &mut KinematicCharacterController,
        ),
        (With<Zombie>, Without<Dead>, Without<Player>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
    mut infect_events: EventWriter<InfectEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
) {
    let Ok((player, player_transform, player_health)) = player_query.get_single() else {
        return;
    };
    let player_position = player_transform.translation.truncate();
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (entity, transform, stats, mut brain, mut facing, mut knockback, mut controller) in
        zombie_query.iter_mut()
    {
        let to_player = player_position - transform.translation.truncate();
        let movement_locked = knockback.is_active();
        let push = knockback.tick(dt);

        let output = brain.think(
            stats,
            now,
            dt,
            Perception {
                to_player,
                player_alive: player_health.is_alive(),
                movement_locked,
                attack_reach: stats.attack_reach(player_config.radius),
            },
        );

        controller.translation = Some(output.step + push);

        let heading = if output.step != Vec2::ZERO {
            Some(output.step)
        } else if brain.state() == AiState::Attacking {
            Some(to_player)
        } else {
            None
        };
        if let Some(compass) = heading.and_then(|direction| facing.turn_towards(direction)) {
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::DirectionChanged(compass),
            });
        }

        if output.attack_started {
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::AttackStarted,
            });
        }
        if output.attack_finished {
            cue_events.send(ActorCueEvent {
                entity,
                cue: ActorCue::AttackStopped,
            });
        }

        if output.strike {
            damage_events.send(DamageEvent {
                target: player,
                source: Some(entity),
                amount: stats.damage,
                knockback: (stats.knockback_force > 0.0).then_some(Impulse {
                    direction: to_player.normalize_or_zero(),
                    force: stats.knockback_force,
                    duration: player_config.knockback_recovery,
                }),
            });
            if stats.infects {
                infect_events.send(InfectEvent { target: player });
            }
        }
    }
}

/// Alert zombies that took a non-lethal hit, and their idle neighbours.
pub fn alert_on_damage(
    mut hit_events: EventReader<HitEvent>,
    mut zombie_query: Query<(Entity, &Transform, &ZombieStats, &mut ZombieBrain), With<Zombie>>,
    mut sound_events: EventWriter<PlaySoundEvent>,
) {
    let hurt: Vec<Entity> = hit_events
        .read()
        .filter(|event| event.amount > 0 && !event.lethal)
        .map(|event| event.entity)
        .collect();
    if hurt.is_empty() {
        return;
    }

    // Snapshot positions and states; kept current as alerts go out
    let mut candidates: Vec<AlertCandidate> = zombie_query
        .iter()
        .map(|(entity, transform, _, brain)| AlertCandidate {
            entity,
            position: transform.translation.truncate(),
            state: brain.state(),
        })
        .collect();

    let mut rng = rand::thread_rng();
    for target in hurt {
        let (origin, range, state) = {
            let Ok((_, transform, stats, mut brain)) = zombie_query.get_mut(target) else {
                continue;
            };
            if !brain.alert(stats) {
                continue;
            }
            (transform.translation.truncate(), stats.alert_range, brain.state())
        };

        sound_events.send(PlaySoundEvent::new(SoundClip::ZombieHit, rng.gen_range(0.8..=1.0)));
        refresh_candidate(&mut candidates, target, state);

        for recipient in alert_recipients(target, origin, range, &candidates) {
            let Ok((_, _, stats, mut brain)) = zombie_query.get_mut(recipient) else {
                continue;
            };
            if brain.alert(stats) {
                refresh_candidate(&mut candidates, recipient, brain.state());
            }
        }
    }
}

fn refresh_candidate(candidates: &mut [AlertCandidate], entity: Entity, state: AiState) {
    if let Some(candidate) = candidates.iter_mut().find(|c| c.entity == entity) {
        candidate.state = state;
    }
}

/// Turn freshly killed zombies into corpses.
pub fn handle_zombie_death(
    mut commands: Commands,
    config: Res<MatchConfig>,
    mut death_events: EventReader<DeathEvent>,
    mut zombie_query: Query<
        (
            &mut ZombieBrain,
            &mut Sprite,
            &mut Transform,
            &mut KinematicCharacterController,
        ),
        With<Zombie>,
    >,
    mut sound_events: EventWriter<PlaySoundEvent>,
) {
    let mut rng = rand::thread_rng();

    for event in death_events.read() {
        let Ok((mut brain, mut sprite, mut transform, mut controller)) =
            zombie_query.get_mut(event.entity)
        else {
            continue;
        };
        if !brain.kill() {
            continue;
        }

        controller.translation = None;
        sprite.color = CORPSE_COLOR;
        transform.translation.z = 0.5;

        commands
            .entity(event.entity)
            .insert((ColliderDisabled, DeathTimer::new(config.corpse_linger)));

        sound_events.send(PlaySoundEvent::new(SoundClip::ZombieDeath, rng.gen_range(1.6..=2.0)));
    }
}

/// Despawn corpses once they have lingered long enough.
pub fn despawn_corpses(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    use crate::combat::WeaponsConfig;
    use crate::player::spawn_player;
    use crate::world::CONTROLLER_OFFSET;
    use crate::zombies::{spawn_zombie, ZombieDefinition};

    #[derive(Resource, Default)]
    struct Strikes(Vec<DamageEvent>);

    fn record_strikes(mut events: EventReader<DamageEvent>, mut strikes: ResMut<Strikes>) {
        strikes.0.extend(events.read().cloned());
    }

    fn ai_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<PlayerConfig>()
            .init_resource::<Strikes>()
            .add_event::<DamageEvent>()
            .add_event::<InfectEvent>()
            .add_event::<ActorCueEvent>()
            .add_systems(Update, (zombie_think, record_strikes).chain());
        app
    }

    /// Player at the origin, zombie where the character controllers stop it.
    fn spawn_pressed_together(app: &mut App, definition: &ZombieDefinition) -> (Entity, Entity) {
        let config = PlayerConfig::default();
        let gap = definition.radius + config.radius + CONTROLLER_OFFSET;
        let world = app.world_mut();
        let spawned = {
            let mut commands = world.commands();
            let player = spawn_player(&mut commands, Vec2::ZERO, &config, &WeaponsConfig::default());
            let zombie = spawn_zombie(&mut commands, "walker", definition, Vec2::new(gap, 0.0));
            (player, zombie)
        };
        world.flush();
        spawned
    }

    fn state_of(app: &App, zombie: Entity) -> AiState {
        app.world().get::<ZombieBrain>(zombie).unwrap().state()
    }

    #[test]
    fn test_walker_touching_player_attacks() {
        let mut app = ai_app();
        let (_, zombie) = spawn_pressed_together(&mut app, &ZombieDefinition::walker());

        app.update();
        assert_eq!(state_of(&app, zombie), AiState::Attacking);
    }

    #[test]
    fn test_short_attack_range_still_attacks_at_contact() {
        let mut app = ai_app();
        let definition = ZombieDefinition {
            attack_range: 0.5,
            ..ZombieDefinition::walker()
        };
        let (_, zombie) = spawn_pressed_together(&mut app, &definition);

        app.update();
        assert_eq!(state_of(&app, zombie), AiState::Attacking);
    }

    #[test]
    fn test_one_attack_lands_once() {
        let mut app = ai_app();
        let walker = ZombieDefinition::walker();
        let (player, zombie) = spawn_pressed_together(&mut app, &walker);

        // The first update has no delta, then 1.1 s: one full attack and part of the cooldown
        for _ in 0..12 {
            app.update();
        }

        let strikes = &app.world().resource::<Strikes>().0;
        assert_eq!(strikes.len(), 1);
        assert_eq!(strikes[0].target, player);
        assert_eq!(strikes[0].source, Some(zombie));
        assert_eq!(strikes[0].amount, walker.damage);
    }

    #[test]
    fn test_far_walker_stays_idle() {
        let mut app = ai_app();
        let walker = ZombieDefinition::walker();
        let world = app.world_mut();
        let zombie = {
            let mut commands = world.commands();
            spawn_player(&mut commands, Vec2::ZERO, &PlayerConfig::default(), &WeaponsConfig::default());
            spawn_zombie(&mut commands, "walker", &walker, Vec2::new(walker.detection_radius + 1.0, 0.0))
        };
        world.flush();

        app.update();
        assert_eq!(state_of(&app, zombie), AiState::Idle);
        assert!(app.world().resource::<Strikes>().0.is_empty());
    }
}
