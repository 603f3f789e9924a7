//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

/// The player character.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Unit aim direction, kept when the cursor leaves the window
    pub aim: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self { aim: Vec2::X }
    }
}

/// Player tunables loaded from `assets/data/player.ron`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    /// Units per second
    pub move_speed: f32,
    /// Collider radius
    pub radius: f32,
    /// Health restored by a vaccine
    pub vaccine_heal: i32,
    /// Damage dealt per infection tick
    pub infection_damage: i32,
    /// Seconds between infection ticks
    pub infection_interval: f32,
    /// Seconds the player is pushed around after a zombie hit
    pub knockback_recovery: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 6.0,
            radius: 0.4,
            vaccine_heal: 10,
            infection_damage: 1,
            infection_interval: 1.0,
            knockback_recovery: 0.3,
        }
    }
}

/// Damage-over-time infection carried by zombie bites.
#[derive(Component, Debug, Clone)]
pub struct Infection {
    infected: bool,
    ticker: Timer,
}

impl Infection {
    pub fn new(interval: f32) -> Self {
        Self {
            infected: false,
            ticker: Timer::from_seconds(interval.max(f32::EPSILON), TimerMode::Repeating),
        }
    }

    pub fn is_infected(&self) -> bool {
        self.infected
    }

    /// Infect (again). The damage ticker restarts either way.
    ///
    /// Returns true if the player was not infected before.
    pub fn infect(&mut self) -> bool {
        self.ticker.reset();
        !std::mem::replace(&mut self.infected, true)
    }

    /// Returns true if the player was infected.
    pub fn cure(&mut self) -> bool {
        self.ticker.reset();
        std::mem::replace(&mut self.infected, false)
    }

    /// Advance the ticker. Returns how many damage ticks are due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        if !self.infected {
            return 0;
        }
        self.ticker.tick(delta);
        self.ticker.times_finished_this_tick()
    }
}
