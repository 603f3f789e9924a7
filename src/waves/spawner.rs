//! Wave spawn timing.

use bevy::prelude::*;

use super::difficulty::{Difficulty, Milestone};
use super::preset::{active_preset, WavePreset};

/// A batch of zombies due this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnBatch {
    /// Index into the preset list
    pub preset: usize,
    pub count: u32,
}

/// What one spawner tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveTick {
    /// Milestones that fired this tick, in list order
    pub milestones: Vec<usize>,
    pub batch: Option<SpawnBatch>,
    /// The preset list was empty
    pub no_preset: bool,
}

/// Spawn accumulator plus difficulty progression.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaveSpawner {
    accumulator: f32,
    difficulty: Difficulty,
}

impl WaveSpawner {
    /// Advance by `dt` with `time_left` whole seconds on the match clock.
    pub fn tick(&mut self, dt: f32, time_left: i32, presets: &[WavePreset], milestones: &[Milestone]) -> WaveTick {
        let mut tick = WaveTick::default();
        if time_left <= 0 {
            return tick;
        }

        tick.milestones = self.difficulty.update(milestones, time_left);

        let Some(index) = active_preset(presets, time_left) else {
            tick.no_preset = true;
            return tick;
        };
        let preset = &presets[index];

        let base_interval = if preset.spawn_interval > 0.0 {
            preset.spawn_interval
        } else {
            1.0
        };
        let interval = base_interval * self.difficulty.interval_multiplier();

        self.accumulator += dt;
        if self.accumulator >= interval {
            self.accumulator = 0.0;
            let count = (preset.spawn_count as f32 * self.difficulty.count_multiplier()).round();
            tick.batch = Some(SpawnBatch {
                preset: index,
                count: count.max(0.0) as u32,
            });
        }
        tick
    }

    pub fn current_wave(&self) -> u32 {
        self.difficulty.current_wave()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::preset::ZombieChance;

    fn presets() -> Vec<WavePreset> {
        vec![WavePreset {
            time_threshold: 0,
            spawn_interval: 2.0,
            spawn_count: 5,
            zombies: vec![ZombieChance {
                archetype: "walker".into(),
                chance: 1,
            }],
        }]
    }

    fn milestones() -> Vec<Milestone> {
        vec![Milestone {
            time_left: 480,
            interval_multiplier: 0.5,
            count_multiplier: 1.2,
            message: "WAVE 2 INCOMING!".into(),
        }]
    }

    #[test]
    fn test_batch_after_interval() {
        let mut spawner = WaveSpawner::default();
        let presets = presets();

        assert_eq!(spawner.tick(1.0, 600, &presets, &[]).batch, None);
        let tick = spawner.tick(1.0, 599, &presets, &[]);
        assert_eq!(tick.batch, Some(SpawnBatch { preset: 0, count: 5 }));
        // Accumulator restarts from zero
        assert_eq!(spawner.tick(1.5, 598, &presets, &[]).batch, None);
    }

    #[test]
    fn test_milestone_scales_interval_and_count() {
        let mut spawner = WaveSpawner::default();
        let presets = presets();
        let milestones = milestones();

        let tick = spawner.tick(1.0, 480, &presets, &milestones);
        assert_eq!(tick.milestones, vec![0]);
        // 5 * 1.2 = 6, interval 2 * 0.5 = 1
        assert_eq!(tick.batch, Some(SpawnBatch { preset: 0, count: 6 }));
        assert_eq!(spawner.current_wave(), 2);

        assert!(spawner.tick(1.0, 479, &presets, &milestones).milestones.is_empty());
    }

    #[test]
    fn test_idle_once_time_is_up() {
        let mut spawner = WaveSpawner::default();
        let tick = spawner.tick(10.0, 0, &presets(), &milestones());
        assert_eq!(tick, WaveTick::default());
        assert_eq!(spawner.current_wave(), 1);
    }

    #[test]
    fn test_empty_presets_are_reported() {
        let mut spawner = WaveSpawner::default();
        let tick = spawner.tick(10.0, 100, &[], &[]);
        assert!(tick.no_preset);
        assert_eq!(tick.batch, None);
    }
}
