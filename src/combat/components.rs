//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent, HitEvent, Impulse};
use crate::core::Compass;

/// What happened when damage was applied to a living entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub previous: i32,
    pub current: i32,
    /// True only on the call that brought health to 0
    pub died: bool,
}

/// Anything that can take damage.
///
/// Player and zombies share `Health`, so the damage pipeline handles both
/// without knowing which kind of actor it is hitting.
pub trait Damageable {
    /// Apply `amount` (negative heals). Returns `None` once dead.
    fn apply_damage(&mut self, amount: i32) -> Option<DamageReport>;

    fn is_dead(&self) -> bool;

    fn is_alive(&self) -> bool {
        !self.is_dead()
    }
}

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: i32,
    maximum: i32,
    dead: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let maximum = max.max(1);
        Self {
            current: maximum,
            maximum,
            dead: false,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.maximum as f32
    }
}

impl Damageable for Health {
    fn apply_damage(&mut self, amount: i32) -> Option<DamageReport> {
        // Dead is terminal, heals included
        if self.dead {
            return None;
        }

        let previous = self.current;
        self.current = (self.current.saturating_sub(amount)).clamp(0, self.maximum);

        let died = self.current == 0;
        if died {
            self.dead = true;
        }

        Some(DamageReport {
            previous,
            current: self.current,
            died,
        })
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Eight-way heading reported to presentation.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing(pub Option<Compass>);

impl Facing {
    /// Turn toward `direction`. Returns the new heading only if it changed.
    pub fn turn_towards(&mut self, direction: Vec2) -> Option<Compass> {
        let heading = Compass::from_vector(direction)?;
        if self.0 == Some(heading) {
            return None;
        }
        self.0 = Some(heading);
        Some(heading)
    }
}

/// Marker component for entities that have died (prevents repeated death handling).
#[derive(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_to_zero_and_dies_once() {
        let mut health = Health::new(30);

        let first = health.apply_damage(20).unwrap();
        assert_eq!(first, DamageReport { previous: 30, current: 10, died: false });

        let second = health.apply_damage(50).unwrap();
        assert_eq!(second.current, 0);
        assert!(second.died);
        assert!(health.is_dead());

        // Terminal: no further reports
        assert!(health.apply_damage(5).is_none());
        assert!(health.apply_damage(-10).is_none());
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_negative_damage_heals_up_to_max() {
        let mut health = Health::new(100);
        health.apply_damage(15);

        let report = health.apply_damage(-10).unwrap();
        assert_eq!(report.current, 95);

        let report = health.apply_damage(-10).unwrap();
        assert_eq!(report.current, 100);
        assert!(!report.died);
    }

    #[test]
    fn test_zero_damage_is_idempotent() {
        let mut health = Health::new(50);
        for _ in 0..5 {
            let report = health.apply_damage(0).unwrap();
            assert_eq!(report.previous, report.current);
            assert!(!report.died);
        }
        assert_eq!(health.current(), 50);
    }

    #[test]
    fn test_health_stays_in_range_for_any_sequence() {
        let mut health = Health::new(40);
        let mut deaths = 0;
        for amount in [7, -3, 12, -100, 25, 0, 9, 1, 1, -5, 30] {
            if let Some(report) = health.apply_damage(amount) {
                assert!((0..=40).contains(&report.current));
                if report.died {
                    deaths += 1;
                }
            }
            assert!((0..=40).contains(&health.current()));
        }
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_facing_reports_only_changes() {
        let mut facing = Facing::default();
        assert_eq!(facing.turn_towards(Vec2::X), Some(Compass::East));
        assert_eq!(facing.turn_towards(Vec2::new(1.0, 0.1)), None);
        assert_eq!(facing.turn_towards(Vec2::ZERO), None);
        assert_eq!(facing.turn_towards(-Vec2::Y), Some(Compass::South));
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        let mut health = Health::new(10);
        assert_eq!(health.apply_damage(i32::MIN).unwrap().current, 10);
        assert!(health.apply_damage(i32::MAX).unwrap().died);
    }
}
