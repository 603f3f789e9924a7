//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::input::{gather_input, InputSnapshot};
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states and the gameplay system-set ordering
/// - Global events (DamageEvent, DeathEvent, etc.)
/// - Input sampling and pause handling
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .init_resource::<InputSnapshot>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<HitEvent>()
            .add_event::<HealthChangedEvent>()
            .add_event::<DeathEvent>()
            .add_event::<InfectEvent>()
            .add_event::<InfectionChangedEvent>()
            .add_event::<WeaponSwitchedEvent>()
            .add_event::<PlaySoundEvent>()
            .add_event::<ActorCueEvent>()
            .add_event::<TimeLeftChangedEvent>()
            .add_event::<ScoreChangedEvent>()
            .add_event::<WaveNotificationEvent>()
            .add_event::<GameOverEvent>()

            // One simulation tick, in order
            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Think,
                    GameplaySet::Act,
                    GameplaySet::Resolve,
                    GameplaySet::React,
                    GameplaySet::Match,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )

            // Input is sampled in every state so pause can be toggled back
            .add_systems(PreUpdate, gather_input.after(bevy::input::InputSystem))

            // Data files are read during Startup, the arena is built on leaving Loading
            .add_systems(Update, transition_to_playing.run_if(in_state(GameState::Loading)))

            // Pause/unpause
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            )
            .add_systems(OnEnter(GameState::Paused), freeze_time)
            .add_systems(OnExit(GameState::Paused), resume_time)
            .add_systems(OnEnter(GameState::GameOver), freeze_time);
    }
}

/// Start the match once startup loading has finished.
fn transition_to_playing(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Playing);
}

/// Toggle pause from the input snapshot.
fn handle_pause_input(
    input: Res<InputSnapshot>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.pause {
        match current_state.get() {
            GameState::Playing => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::Playing),
            _ => {}
        }
    }
}

/// Stop virtual time, which freezes every gameplay timer.
fn freeze_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
