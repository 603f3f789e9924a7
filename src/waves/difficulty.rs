//! Difficulty milestones over the match timer.

use serde::Deserialize;

/// A one-time difficulty bump once `time_left` drops to a threshold.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Milestone {
    pub time_left: i32,
    /// Spawn interval multiplier from this point on
    pub interval_multiplier: f32,
    /// Spawn count multiplier from this point on
    pub count_multiplier: f32,
    /// Banner text shown when reached
    pub message: String,
}

/// Which milestones have fired and the multipliers they left behind.
#[derive(Debug, Clone)]
pub struct Difficulty {
    reached: Vec<bool>,
    interval_multiplier: f32,
    count_multiplier: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            reached: Vec::new(),
            interval_multiplier: 1.0,
            count_multiplier: 1.0,
        }
    }
}

impl Difficulty {
    /// Fire every milestone crossed at `time_left` that has not fired yet.
    ///
    /// Returns the indices that fired, in list order. Multipliers are
    /// absolute, so the last milestone to fire decides them.
    pub fn update(&mut self, milestones: &[Milestone], time_left: i32) -> Vec<usize> {
        if self.reached.len() < milestones.len() {
            self.reached.resize(milestones.len(), false);
        }

        let mut fired = Vec::new();
        for (index, milestone) in milestones.iter().enumerate() {
            if self.reached[index] || time_left > milestone.time_left {
                continue;
            }
            self.reached[index] = true;
            self.interval_multiplier = milestone.interval_multiplier;
            self.count_multiplier = milestone.count_multiplier;
            fired.push(index);
        }
        fired
    }

    pub fn interval_multiplier(&self) -> f32 {
        self.interval_multiplier
    }

    pub fn count_multiplier(&self) -> f32 {
        self.count_multiplier
    }

    /// 1 plus the number of milestones reached.
    pub fn current_wave(&self) -> u32 {
        1 + self.reached.iter().filter(|reached| **reached).count() as u32
    }
}
