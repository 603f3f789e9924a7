//! End-to-end rule scenarios driven through the public gameplay types.

use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use zombie_outbreak::combat::weapons::{FireAction, Trigger};
use zombie_outbreak::combat::{Damageable, Health, Loadout, WeaponsConfig};
use zombie_outbreak::game::{ExitZone, MatchOutcome, MatchState};
use zombie_outbreak::pickups::{nearest_item, resolve_pickup, ItemType, PickupEffect};
use zombie_outbreak::player::{Infection, PlayerConfig};
use zombie_outbreak::waves::preset::{active_preset, choose_archetype};
use zombie_outbreak::waves::{WaveSpawner, WavesConfig, ZombieChance};
use zombie_outbreak::zombies::alert::{alert_recipients, AlertCandidate};
use zombie_outbreak::zombies::{AiState, Perception, ZombieBrain, ZombieStats};

const DT: f32 = 0.1;

#[test]
fn zombie_attack_cycle_costs_the_player_ten_health() {
    let stats = ZombieStats::default();
    let mut brain = ZombieBrain::new(&stats);
    let mut player = Health::new(100);
    let mut health_changes = 0;

    for step in 0..30 {
        let output = brain.think(
            &stats,
            step as f32 * DT,
            DT,
            Perception {
                to_player: Vec2::new(0.5, 0.0),
                player_alive: player.is_alive(),
                movement_locked: false,
                attack_reach: stats.attack_reach(PlayerConfig::default().radius),
            },
        );
        if output.strike && player.apply_damage(stats.damage).is_some() {
            health_changes += 1;
        }
        if output.attack_finished {
            break;
        }
    }

    assert_eq!(player.current(), 90);
    assert_eq!(health_changes, 1);
    assert_eq!(brain.state(), AiState::Chasing);
}

#[test]
fn player_death_during_wind_up_cancels_the_strike() {
    let stats = ZombieStats::default();
    let mut brain = ZombieBrain::new(&stats);
    let perception = |alive| Perception {
        to_player: Vec2::new(0.5, 0.0),
        player_alive: alive,
        movement_locked: false,
        attack_reach: stats.attack_reach(PlayerConfig::default().radius),
    };

    assert!(brain.think(&stats, 0.0, DT, perception(true)).attack_started);
    let strikes = (1..15)
        .map(|step| brain.think(&stats, step as f32 * DT, DT, perception(false)))
        .filter(|output| output.strike)
        .count();
    assert_eq!(strikes, 0);
}

#[test]
fn match_timer_runs_out_exactly_once() {
    let mut state = MatchState::default();
    let mut losses = 0;
    let mut last = state.time_left();

    for _ in 0..700 {
        if let Some(time_left) = state.tick(Duration::from_secs(1)) {
            assert!(time_left < last);
            last = time_left;
            if time_left == 0 && state.finish(false) {
                losses += 1;
            }
        }
    }

    assert_eq!(losses, 1);
    assert_eq!(state.time_left(), 0);
    assert_eq!(state.outcome(), Some(MatchOutcome::Lost));
}

#[test]
fn reaching_the_exit_wins_once() {
    let mut state = MatchState::default();
    let mut zone = ExitZone::new(Rect::new(60.0, 60.0, 66.0, 66.0));
    let mut wins = 0;

    for position in [Vec2::new(58.0, 62.0), Vec2::new(61.0, 62.0), Vec2::new(58.0, 62.0), Vec2::new(61.0, 62.0)] {
        if zone.update(position, false) && state.finish(true) {
            wins += 1;
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(state.outcome(), Some(MatchOutcome::Won));
}

#[test]
fn nearest_vaccine_is_consumed() {
    let player = Vec2::ZERO;
    let near = Entity::from_raw(1);
    let far = Entity::from_raw(2);
    let mut items = vec![
        (far, Vec2::new(0.0, 1.0), 1.5, ItemType::Vaccine),
        (near, Vec2::new(0.5, 0.0), 1.5, ItemType::Vaccine),
    ];

    let picked = nearest_item(player, items.iter().map(|(e, p, r, _)| (*e, *p, *r))).unwrap();
    assert_eq!(picked, near);

    let mut loadout = Loadout::new(WeaponsConfig::default().weapons);
    let mut infection = Infection::new(1.0);
    infection.infect();
    let mut health = Health::new(100);
    health.apply_damage(30);

    let effect = resolve_pickup(ItemType::Vaccine, &mut loadout, &mut infection, 10).unwrap();
    let PickupEffect::Vaccine { cured, heal } = effect else {
        panic!("vaccine should heal");
    };
    health.apply_damage(-heal);
    items.retain(|(entity, ..)| *entity != picked);

    assert!(cured);
    assert!(!infection.is_infected());
    assert_eq!(health.current(), 80);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0, far);
}

#[test]
fn damage_alerts_only_idle_neighbours_in_range() {
    let stats = ZombieStats::default();
    let ids = [Entity::from_raw(1), Entity::from_raw(2), Entity::from_raw(3)];
    let positions = [Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(20.0, 0.0)];
    let mut brains: Vec<ZombieBrain> = ids.iter().map(|_| ZombieBrain::new(&stats)).collect();

    brains[0].alert(&stats);
    let candidates: Vec<AlertCandidate> = ids
        .iter()
        .zip(positions)
        .zip(&brains)
        .map(|((entity, position), brain)| AlertCandidate {
            entity: *entity,
            position,
            state: brain.state(),
        })
        .collect();
    for recipient in alert_recipients(ids[0], positions[0], stats.alert_range, &candidates) {
        let index = ids.iter().position(|id| *id == recipient).unwrap();
        brains[index].alert(&stats);
    }

    assert_eq!(brains[0].detection_radius(), stats.alerted_radius);
    assert_eq!(brains[1].detection_radius(), stats.alerted_radius);
    assert_eq!(brains[2].detection_radius(), stats.detection_radius);
}

#[test]
fn weapon_switch_closes_the_melee_damage_window() {
    let mut loadout = Loadout::new(WeaponsConfig::default().weapons);
    loadout.switch_to(2);
    let press = Trigger {
        pressed: true,
        held: true,
    };

    assert_eq!(loadout.try_fire(0.0, Vec2::X, press), FireAction::SwingStarted);
    assert!(!loadout.swing().unwrap().hit_enabled());

    let mut saw_active = false;
    for _ in 0..5 {
        loadout.advance(0.02, Vec2::X);
        saw_active |= loadout.swing().is_some_and(|swing| swing.hit_enabled());
    }
    assert!(saw_active);

    let switch = loadout.switch_to(0).unwrap();
    assert!(switch.swing_cancelled);
    assert!(loadout.swing().map_or(true, |swing| !swing.hit_enabled()));
}

#[test]
fn milestones_fire_once_while_the_clock_counts_down() {
    let config = WavesConfig::default();
    let mut spawner = WaveSpawner::default();
    let mut fired = Vec::new();

    for time_left in (1..=600).rev() {
        let tick = spawner.tick(1.0, time_left, &config.presets, &config.milestones);
        fired.extend(tick.milestones.iter().map(|index| (time_left, *index)));
    }

    assert_eq!(fired, vec![(480, 0), (300, 1)]);
    assert_eq!(spawner.current_wave(), 3);
    assert_eq!(spawner.difficulty().interval_multiplier(), 0.6);
}

#[test]
fn weighted_archetypes_follow_their_chances() {
    let table = [
        ZombieChance {
            archetype: "a".into(),
            chance: 1,
        },
        ZombieChance {
            archetype: "b".into(),
            chance: 3,
        },
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let mut b = 0usize;
    for _ in 0..100_000 {
        if choose_archetype(&table, &mut rng) == Some("b") {
            b += 1;
        }
    }
    let ratio = b as f64 / 100_000.0;
    assert!((ratio - 0.75).abs() < 0.01, "b ratio {}", ratio);
}

#[test]
fn presets_switch_as_time_runs_down() {
    let config = WavesConfig::default();
    assert_eq!(active_preset(&config.presets, 600), Some(0));
    assert_eq!(active_preset(&config.presets, 400), Some(1));
    assert_eq!(active_preset(&config.presets, 10), Some(2));
}
