//! Flamethrower emitter and damage cone.

use bevy::prelude::*;

/// Continuous-fire state of a flamethrower.
///
/// While active, a damage pulse is due every `interval` seconds starting at
/// the moment of ignition. Extinguishing stops pulses immediately.
#[derive(Debug, Clone, Default)]
pub struct FlameEmitter {
    active: bool,
    next_pulse: f32,
}

impl FlameEmitter {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the flame on. Returns true if it was off.
    pub fn ignite(&mut self, now: f32) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.next_pulse = now;
        true
    }

    /// Turn the flame off. Returns true if it was on.
    pub fn extinguish(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Whether a damage pulse is due at `now`; schedules the next one if so.
    pub fn pulse_due(&mut self, now: f32, interval: f32) -> bool {
        if !self.active || now < self.next_pulse {
            return false;
        }
        self.next_pulse = now + interval.max(f32::EPSILON);
        true
    }
}

/// Directions of `count` rays spread evenly across a cone of `spread_degrees`
/// centered on `forward`.
pub fn cone_rays(forward: Vec2, spread_degrees: f32, count: u32) -> Vec<Vec2> {
    match count {
        0 => Vec::new(),
        1 => vec![forward],
        _ => {
            let step = spread_degrees / (count - 1) as f32;
            let start = -spread_degrees / 2.0;
            (0..count)
                .map(|i| {
                    let angle = (start + step * i as f32).to_radians();
                    Vec2::from_angle(angle).rotate(forward)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pulse_is_immediate() {
        let mut flame = FlameEmitter::default();
        assert!(flame.ignite(5.0));
        assert!(!flame.ignite(5.0));
        assert!(flame.pulse_due(5.0, 0.1));
        assert!(!flame.pulse_due(5.05, 0.1));
        assert!(flame.pulse_due(5.15, 0.1));
    }

    #[test]
    fn test_no_pulses_after_extinguish() {
        let mut flame = FlameEmitter::default();
        flame.ignite(0.0);
        assert!(flame.extinguish());
        assert!(!flame.extinguish());
        assert!(!flame.pulse_due(10.0, 0.1));
    }

    #[test]
    fn test_cone_spans_spread_evenly() {
        let rays = cone_rays(Vec2::X, 30.0, 8);
        assert_eq!(rays.len(), 8);

        let first = rays[0].y.atan2(rays[0].x).to_degrees();
        let last = rays[7].y.atan2(rays[7].x).to_degrees();
        assert!((first + 15.0).abs() < 1e-3);
        assert!((last - 15.0).abs() < 1e-3);

        for ray in &rays {
            assert!((ray.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cone_follows_forward() {
        let rays = cone_rays(Vec2::Y, 30.0, 3);
        assert!((rays[1] - Vec2::Y).length() < 1e-5);
        assert_eq!(cone_rays(Vec2::Y, 30.0, 1), vec![Vec2::Y]);
        assert!(cone_rays(Vec2::Y, 30.0, 0).is_empty());
    }
}
