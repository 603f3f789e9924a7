//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Gameplay systems
//! only run while `Playing`; `Paused` and `GameOver` freeze virtual time so
//! every gameplay timer stops with them.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - `Playing` is the running match
/// - `Paused` freezes the match but keeps the world visible
/// - `GameOver` is terminal for the match (win or lose)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files and building the arena
    #[default]
    Loading,
    /// Active match
    Playing,
    /// Match is paused (overlay on gameplay)
    Paused,
    /// Match ended, see `MatchState` for the result
    GameOver,
}

/// Per-frame ordering of gameplay systems.
///
/// One pass through these sets is one simulation tick: input is sampled,
/// agents decide, actions are carried out, damage is resolved, entities
/// react to what happened, and finally the match controller looks at the
/// aggregate state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Think,
    Act,
    Resolve,
    React,
    Match,
}
