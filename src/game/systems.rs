//! Match systems - kills, player death, the exit, the clock and game over.
//!
//! These run last in the tick so they see every death and health change
//! that happened during it.

use bevy::prelude::*;

use super::exit::ExitZone;
use super::state::{MatchConfig, MatchState};
use crate::core::{
    DeathEvent, GameOverEvent, GameState, GameplaySet, InfectionChangedEvent, ScoreChangedEvent,
    TimeLeftChangedEvent,
};
use crate::player::{Infection, Player};
use crate::zombies::Zombie;

const EXIT_OPEN_COLOR: Color = Color::srgba(0.2, 0.9, 0.3, 0.5);
const EXIT_BLOCKED_COLOR: Color = Color::srgba(0.9, 0.2, 0.2, 0.5);

pub fn setup_match_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), start_match)
        .add_systems(Update, tint_exit_zone.in_set(GameplaySet::React))
        .add_systems(
            Update,
            (
                count_kills,
                check_player_death,
                check_exit_zone,
                tick_match_timer,
                enter_game_over,
            )
                .chain()
                .in_set(GameplaySet::Match),
        );
}

fn start_match(
    mut commands: Commands,
    config: Res<MatchConfig>,
    mut time_events: EventWriter<TimeLeftChangedEvent>,
) {
    let state = MatchState::new(&config);
    info!("Match started: {}s on the clock", state.time_left());
    time_events.send(TimeLeftChangedEvent {
        time_left: state.time_left(),
    });
    commands.insert_resource(state);
}

pub(crate) fn count_kills(
    mut death_events: EventReader<DeathEvent>,
    zombies: Query<(), With<Zombie>>,
    mut state: ResMut<MatchState>,
    mut score_events: EventWriter<ScoreChangedEvent>,
) {
    for event in death_events.read() {
        if !zombies.contains(event.entity) {
            continue;
        }
        if let Some(kills) = state.record_kill() {
            score_events.send(ScoreChangedEvent { kills });
        }
    }
}

fn check_player_death(
    mut death_events: EventReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut state: ResMut<MatchState>,
    mut game_over: EventWriter<GameOverEvent>,
) {
    for event in death_events.read() {
        if players.contains(event.entity) && state.finish(false) {
            info!("Player died");
            game_over.send(GameOverEvent { won: false });
        }
    }
}

fn check_exit_zone(
    mut zones: Query<&mut ExitZone>,
    player_query: Query<(&Transform, &Infection), With<Player>>,
    mut state: ResMut<MatchState>,
    mut game_over: EventWriter<GameOverEvent>,
) {
    let Ok((transform, infection)) = player_query.get_single() else {
        return;
    };
    let position = transform.translation.truncate();

    for mut zone in &mut zones {
        if zone.update(position, infection.is_infected()) && state.finish(true) {
            info!("Player reached the exit");
            game_over.send(GameOverEvent { won: true });
        }
    }
}

fn tick_match_timer(
    time: Res<Time>,
    mut state: ResMut<MatchState>,
    mut time_events: EventWriter<TimeLeftChangedEvent>,
    mut game_over: EventWriter<GameOverEvent>,
) {
    let Some(time_left) = state.tick(time.delta()) else {
        return;
    };
    time_events.send(TimeLeftChangedEvent { time_left });

    if time_left == 0 && state.finish(false) {
        info!("Time ran out");
        game_over.send(GameOverEvent { won: false });
    }
}

fn enter_game_over(
    mut game_over: EventReader<GameOverEvent>,
    state: Res<MatchState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(event) = game_over.read().last() {
        info!(
            "Match over: {} with {} kills",
            if event.won { "won" } else { "lost" },
            state.kills()
        );
        next_state.set(GameState::GameOver);
    }
}

fn tint_exit_zone(
    mut infection_events: EventReader<InfectionChangedEvent>,
    mut zones: Query<&mut Sprite, With<ExitZone>>,
) {
    let Some(event) = infection_events.read().last() else {
        return;
    };
    let color = exit_zone_color(event.infected);
    for mut sprite in &mut zones {
        sprite.color = color;
    }
}

/// Exit zone sprite color for the player's current infection state.
pub fn exit_zone_color(infected: bool) -> Color {
    if infected {
        EXIT_BLOCKED_COLOR
    } else {
        EXIT_OPEN_COLOR
    }
}
