//! Wave systems - spawn zombies on schedule and drop vaccines.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::thread_rng;

use super::config::WavesConfig;
use super::placement::{candidate_position, find_spawn_position, is_valid_position};
use super::preset::choose_archetype;
use super::spawner::WaveSpawner;
use super::supply::SupplyDrop;
use crate::core::{GameplaySet, WaveNotificationEvent};
use crate::game::MatchState;
use crate::pickups::{spawn_item, ItemType};
use crate::player::Player;
use crate::world::{ArenaConfig, CameraView, RapierSpatialQuery};
use crate::zombies::{spawn_zombie, ZombieRegistry};

pub fn setup_wave_systems(app: &mut App) {
    app.add_systems(
        Update,
        (run_waves, drop_supplies).in_set(GameplaySet::Think),
    );
}

#[allow(clippy::too_many_arguments)]
fn run_waves(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<WavesConfig>,
    arena: Res<ArenaConfig>,
    view: Res<CameraView>,
    registry: Res<ZombieRegistry>,
    match_state: Res<MatchState>,
    mut spawner: ResMut<WaveSpawner>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<&Transform, With<Player>>,
    mut notifications: EventWriter<WaveNotificationEvent>,
    mut warned_no_preset: Local<bool>,
) {
    let tick = spawner.tick(
        time.delta_secs(),
        match_state.time_left(),
        &config.presets,
        &config.milestones,
    );

    for index in tick.milestones {
        let Some(milestone) = config.milestones.get(index) else {
            continue;
        };
        let wave = index as u32 + 2;
        info!("Wave {} reached: {}", wave, milestone.message);
        notifications.send(WaveNotificationEvent {
            wave,
            message: milestone.message.clone(),
        });
    }

    if tick.no_preset {
        if !*warned_no_preset {
            warn!("No wave presets configured; nothing will spawn");
            *warned_no_preset = true;
        }
        return;
    }

    let Some(batch) = tick.batch else {
        return;
    };
    let Some(preset) = config.presets.get(batch.preset) else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let player = player_query.get_single().ok().map(|t| t.translation.truncate());
    let bounds = arena.bounds.rect();
    let mut rng = thread_rng();

    let mut spawned = 0;
    for _ in 0..batch.count {
        let Some(position) =
            find_spawn_position(view.0, bounds, player, &world, &config.placement, &mut rng)
        else {
            debug!("No free spawn position, skipping zombie");
            continue;
        };
        let Some(archetype) = choose_archetype(&preset.zombies, &mut rng) else {
            warn!("Wave preset at {}s has no zombies", preset.time_threshold);
            break;
        };
        let Some(definition) = registry.get(archetype) else {
            warn!("Unknown zombie archetype '{}'", archetype);
            continue;
        };
        spawn_zombie(&mut commands, archetype, definition, position);
        spawned += 1;
    }
    debug!(
        "Spawned {}/{} zombies (wave {})",
        spawned,
        batch.count,
        spawner.current_wave()
    );
}

#[allow(clippy::too_many_arguments)]
fn drop_supplies(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<WavesConfig>,
    arena: Res<ArenaConfig>,
    view: Res<CameraView>,
    mut supply: ResMut<SupplyDrop>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<&Transform, With<Player>>,
) {
    let due = supply.tick(time.delta_secs(), &config.supply_drop);
    if due == 0 {
        return;
    }
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let player = player_query.get_single().ok().map(|t| t.translation.truncate());
    let bounds = arena.bounds.rect();
    let mut rng = thread_rng();

    for _ in 0..due {
        let position = candidate_position(view.0, bounds, player, &config.placement, &mut rng);
        if is_valid_position(position, bounds, &world, &config.placement) {
            info!("Vaccine dropped at {}", position);
            spawn_item(
                &mut commands,
                ItemType::Vaccine,
                position,
                config.supply_drop.pickup_range,
            );
        } else {
            debug!("Supply drop blocked at {}", position);
        }
    }
}
