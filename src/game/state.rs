//! Match clock, score and outcome.

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

pub const MATCH_PATH: &str = "assets/data/match.ron";

/// Match tunables.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seconds on the clock at match start
    pub duration: i32,
    /// Seconds removed per real second (1..=10)
    pub timer_multiplier: i32,
    /// How long zombie corpses stay before despawning
    pub corpse_linger: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration: 600,
            timer_multiplier: 1,
            corpse_linger: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Won,
    Lost,
}

/// The running match. Frozen once an outcome is set.
#[derive(Resource, Debug, Clone)]
pub struct MatchState {
    time_left: i32,
    timer_multiplier: i32,
    second: Timer,
    kills: u32,
    outcome: Option<MatchOutcome>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            time_left: config.duration.max(0),
            timer_multiplier: config.timer_multiplier.clamp(1, 10),
            second: Timer::from_seconds(1.0, TimerMode::Repeating),
            kills: 0,
            outcome: None,
        }
    }

    pub fn time_left(&self) -> i32 {
        self.time_left
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance the clock. Returns the new time left whenever it changed.
    ///
    /// Never counts below zero and stops for good once the match is over.
    pub fn tick(&mut self, delta: Duration) -> Option<i32> {
        if self.is_over() || self.time_left <= 0 {
            return None;
        }
        self.second.tick(delta);
        let seconds = self.second.times_finished_this_tick() as i32;
        if seconds == 0 {
            return None;
        }
        self.time_left = (self.time_left - seconds * self.timer_multiplier).max(0);
        Some(self.time_left)
    }

    /// Record a zombie kill. Returns the new total, or `None` after the match ended.
    pub fn record_kill(&mut self) -> Option<u32> {
        if self.is_over() {
            return None;
        }
        self.kills += 1;
        Some(self.kills)
    }

    /// End the match. Only the first call has any effect.
    pub fn finish(&mut self, won: bool) -> bool {
        if self.is_over() {
            return false;
        }
        self.outcome = Some(if won { MatchOutcome::Won } else { MatchOutcome::Lost });
        true
    }
}

/// `MM:SS` for the HUD.
pub fn format_clock(seconds: i32) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second() -> Duration {
        Duration::from_secs(1)
    }

    #[test]
    fn test_clock_counts_down_once_per_second() {
        let mut state = MatchState::default();
        assert_eq!(state.tick(Duration::from_millis(500)), None);
        assert_eq!(state.tick(Duration::from_millis(500)), Some(599));
        assert_eq!(state.tick(second()), Some(598));
    }

    #[test]
    fn test_multiplier_and_floor_at_zero() {
        let mut state = MatchState::new(&MatchConfig {
            duration: 5,
            timer_multiplier: 3,
            ..default()
        });
        assert_eq!(state.tick(second()), Some(2));
        assert_eq!(state.tick(second()), Some(0));
        assert_eq!(state.tick(second()), None);
    }

    #[test]
    fn test_finish_only_once() {
        let mut state = MatchState::default();
        assert!(state.finish(true));
        assert!(!state.finish(false));
        assert_eq!(state.outcome(), Some(MatchOutcome::Won));
        assert_eq!(state.tick(second()), None);
        assert_eq!(state.record_kill(), None);
    }

    #[test]
    fn test_kills_accumulate() {
        let mut state = MatchState::default();
        assert_eq!(state.record_kill(), Some(1));
        assert_eq!(state.record_kill(), Some(2));
        assert_eq!(state.kills(), 2);
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(-3), "00:00");
    }
}
