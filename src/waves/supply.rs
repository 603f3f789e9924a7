//! Periodic vaccine drops.

use bevy::prelude::*;
use serde::Deserialize;

/// Supply drop schedule.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SupplyDropConfig {
    /// Seconds before the drop clock starts
    pub initial_delay: f32,
    /// Seconds between drops
    pub interval: f32,
    pub pickup_range: f32,
}

impl Default for SupplyDropConfig {
    fn default() -> Self {
        Self {
            initial_delay: 5.0,
            interval: 15.0,
            pickup_range: 1.5,
        }
    }
}

/// Drop clock. Drops land at `initial_delay + n * interval` for n >= 1.
#[derive(Resource, Debug, Clone, Default)]
pub struct SupplyDrop {
    elapsed: f32,
    dropped: u32,
}

impl SupplyDrop {
    /// Advance the clock and return how many drops came due.
    pub fn tick(&mut self, dt: f32, config: &SupplyDropConfig) -> u32 {
        self.elapsed += dt.max(0.0);
        if config.interval <= 0.0 || self.elapsed < config.initial_delay {
            return 0;
        }
        let due = ((self.elapsed - config.initial_delay) / config.interval).floor() as u32;
        let fresh = due.saturating_sub(self.dropped);
        self.dropped = due.max(self.dropped);
        fresh
    }
}
