//! Knockback: a decaying push that suspends the target's own movement.

use bevy::prelude::*;

use super::Impulse;

/// Active push on an entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Knockback {
    velocity: Vec2,
    remaining: f32,
    duration: f32,
}

impl Knockback {
    /// Start (or restart) a push. A non-positive duration clears it.
    pub fn apply(&mut self, impulse: Impulse) {
        if impulse.duration <= 0.0 {
            *self = Self::default();
            return;
        }
        self.velocity = impulse.direction.normalize_or_zero() * impulse.force;
        self.remaining = impulse.duration;
        self.duration = impulse.duration;
    }

    /// Whether the entity's own movement is suspended.
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Displacement for this tick. The push fades linearly to zero over its duration.
    pub fn tick(&mut self, dt: f32) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let strength = self.remaining / self.duration;
        self.remaining = (self.remaining - dt).max(0.0);
        self.velocity * strength * dt
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
