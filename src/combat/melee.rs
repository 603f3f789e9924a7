//! Melee swing timeline.
//!
//! A swing is split into three phases over its duration:
//!
//! | phase   | share | blade motion                 | damage |
//! |---------|-------|------------------------------|--------|
//! | wind-up | 10%   | rest angle -> start angle    | off    |
//! | active  | 80%   | start angle -> end angle     | on     |
//! | return  | 10%   | end angle -> current aim     | off    |
//!
//! The arc spans `SWING_HALF_ARC` degrees either side of the aim direction
//! taken when the swing starts. Facing right the blade sweeps top to bottom,
//! facing left it sweeps the mirrored way so the arc never crosses behind
//! the player's head.

use bevy::prelude::*;
use std::collections::HashSet;

/// Degrees either side of the aim direction covered by a swing.
pub const SWING_HALF_ARC: f32 = 70.0;

const WIND_UP_SHARE: f32 = 0.1;
const ACTIVE_SHARE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingPhase {
    WindUp,
    Active,
    Return,
    Finished,
}

/// Where the blade is after advancing a swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingFrame {
    pub phase: SwingPhase,
    /// Blade angle in degrees
    pub angle: f32,
}

impl SwingFrame {
    /// Unit vector along the blade.
    pub fn blade_direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }
}

/// One swing of a melee weapon.
#[derive(Debug, Clone)]
pub struct MeleeSwing {
    duration: f32,
    elapsed: f32,
    rest_angle: f32,
    start_angle: f32,
    end_angle: f32,
    hit_enabled: bool,
    struck: HashSet<Entity>,
    cancelled: bool,
}

impl MeleeSwing {
    /// Start a swing toward `aim` with the blade currently resting at `rest_angle`.
    pub fn begin(aim: Vec2, rest_angle: f32, duration: f32) -> Self {
        let center = aim.y.atan2(aim.x).to_degrees();
        let (start_angle, end_angle) = if aim.x >= 0.0 {
            (center + SWING_HALF_ARC, center - SWING_HALF_ARC)
        } else {
            (center - SWING_HALF_ARC, center + SWING_HALF_ARC)
        };

        Self {
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            rest_angle,
            start_angle,
            end_angle,
            hit_enabled: false,
            struck: HashSet::new(),
            cancelled: false,
        }
    }

    pub fn phase(&self) -> SwingPhase {
        if self.cancelled || self.elapsed >= self.duration {
            SwingPhase::Finished
        } else if self.elapsed < self.duration * WIND_UP_SHARE {
            SwingPhase::WindUp
        } else if self.elapsed < self.duration * (WIND_UP_SHARE + ACTIVE_SHARE) {
            SwingPhase::Active
        } else {
            SwingPhase::Return
        }
    }

    /// Whether a blade contact right now would deal damage.
    pub fn hit_enabled(&self) -> bool {
        self.hit_enabled
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == SwingPhase::Finished
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    /// Advance the timeline by `dt`. `aim_angle` is where the blade returns to.
    pub fn advance(&mut self, dt: f32, aim_angle: f32) -> SwingFrame {
        if !self.cancelled {
            self.elapsed += dt;
        }

        let phase = self.phase();
        // The flag follows phase boundaries, never left on past the active window
        self.hit_enabled = phase == SwingPhase::Active;

        let wind_up = self.duration * WIND_UP_SHARE;
        let active = self.duration * ACTIVE_SHARE;
        let recovery = self.duration - wind_up - active;

        let angle = match phase {
            SwingPhase::WindUp => lerp_angle(self.rest_angle, self.start_angle, self.elapsed / wind_up),
            SwingPhase::Active => {
                lerp_angle(self.start_angle, self.end_angle, (self.elapsed - wind_up) / active)
            }
            SwingPhase::Return => lerp_angle(
                self.end_angle,
                aim_angle,
                (self.elapsed - wind_up - active) / recovery,
            ),
            SwingPhase::Finished => aim_angle,
        };

        SwingFrame { phase, angle }
    }

    /// Claim a hit on `target`. True at most once per target, and only while damage is enabled.
    pub fn register_hit(&mut self, target: Entity) -> bool {
        self.hit_enabled && self.struck.insert(target)
    }

    /// Abort the swing (weapon switched away). Damage is forced off.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.hit_enabled = false;
    }
}

/// Interpolate between two angles in degrees along the shortest path.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: f32 = 0.3;
    const STEP: f32 = 0.01;

    #[test]
    fn test_hit_window_follows_phases() {
        let mut swing = MeleeSwing::begin(Vec2::X, 0.0, DURATION);
        assert!(!swing.hit_enabled());

        let mut seen = Vec::new();
        while !swing.is_finished() {
            let frame = swing.advance(STEP, 0.0);
            match frame.phase {
                SwingPhase::Active => assert!(swing.hit_enabled()),
                _ => assert!(!swing.hit_enabled()),
            }
            if seen.last() != Some(&frame.phase) {
                seen.push(frame.phase);
            }
        }

        assert_eq!(
            seen,
            vec![SwingPhase::WindUp, SwingPhase::Active, SwingPhase::Return, SwingPhase::Finished]
        );
        assert!(!swing.hit_enabled());
    }

    #[test]
    fn test_target_is_hit_once_per_swing() {
        let target = Entity::from_raw(7);
        let mut swing = MeleeSwing::begin(Vec2::X, 0.0, DURATION);

        // Contact during wind-up does nothing
        swing.advance(0.01, 0.0);
        assert!(!swing.register_hit(target));

        swing.advance(0.05, 0.0);
        assert!(swing.register_hit(target));
        assert!(!swing.register_hit(target));
        assert!(swing.register_hit(Entity::from_raw(8)));
    }

    #[test]
    fn test_cancel_forces_damage_off() {
        let mut swing = MeleeSwing::begin(Vec2::X, 0.0, DURATION);
        swing.advance(0.1, 0.0);
        assert!(swing.hit_enabled());

        swing.cancel();
        assert!(!swing.hit_enabled());
        assert!(swing.is_finished());
        assert!(!swing.register_hit(Entity::from_raw(1)));

        swing.advance(0.01, 0.0);
        assert!(!swing.hit_enabled());
    }

    #[test]
    fn test_arc_direction_depends_on_facing() {
        let right = MeleeSwing::begin(Vec2::X, 0.0, DURATION);
        assert_eq!(right.start_angle(), 70.0);
        assert_eq!(right.end_angle(), -70.0);

        let left = MeleeSwing::begin(-Vec2::X, 180.0, DURATION);
        assert_eq!(left.start_angle(), 110.0);
        assert_eq!(left.end_angle(), 250.0);
    }

    #[test]
    fn test_blade_sweeps_between_arc_ends() {
        let mut swing = MeleeSwing::begin(Vec2::X, 0.0, 1.0);
        let early = swing.advance(0.15, 0.0);
        let late = swing.advance(0.7, 0.0);
        assert_eq!(early.phase, SwingPhase::Active);
        assert_eq!(late.phase, SwingPhase::Active);
        assert!(early.angle > late.angle);
        assert!(early.angle <= 70.0 && late.angle >= -70.0);
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        assert!((lerp_angle(170.0, -170.0, 0.5) - 180.0).abs() < 1e-4);
        assert!((lerp_angle(10.0, 50.0, 0.5) - 30.0).abs() < 1e-4);
        assert_eq!(lerp_angle(10.0, 50.0, 2.0), 50.0);
    }
}
