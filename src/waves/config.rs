//! Wave tunables loaded from `assets/data/waves.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use super::difficulty::Milestone;
use super::placement::PlacementConfig;
use super::preset::{WavePreset, ZombieChance};
use super::supply::SupplyDropConfig;

pub const WAVES_PATH: &str = "assets/data/waves.ron";

/// Everything that drives zombie waves and supply drops.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WavesConfig {
    /// Ordered by descending `time_threshold`
    pub presets: Vec<WavePreset>,
    /// Ordered by descending `time_left`
    pub milestones: Vec<Milestone>,
    pub placement: PlacementConfig,
    pub supply_drop: SupplyDropConfig,
}

impl Default for WavesConfig {
    fn default() -> Self {
        let walkers = || {
            vec![ZombieChance {
                archetype: "walker".into(),
                chance: 1,
            }]
        };
        Self {
            presets: vec![
                WavePreset {
                    time_threshold: 480,
                    spawn_interval: 4.0,
                    spawn_count: 2,
                    zombies: walkers(),
                },
                WavePreset {
                    time_threshold: 300,
                    spawn_interval: 3.0,
                    spawn_count: 3,
                    zombies: walkers(),
                },
                WavePreset {
                    time_threshold: 0,
                    spawn_interval: 2.5,
                    spawn_count: 4,
                    zombies: walkers(),
                },
            ],
            milestones: vec![
                Milestone {
                    time_left: 480,
                    interval_multiplier: 0.8,
                    count_multiplier: 1.2,
                    message: "WAVE 2 INCOMING!".into(),
                },
                Milestone {
                    time_left: 300,
                    interval_multiplier: 0.6,
                    count_multiplier: 1.5,
                    message: "FINAL WAVE - SURVIVE!".into(),
                },
            ],
            placement: PlacementConfig::default(),
            supply_drop: SupplyDropConfig::default(),
        }
    }
}
