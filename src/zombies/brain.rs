//! Zombie decision making.
//!
//! `ZombieBrain` is the whole per-zombie state machine. Systems feed it what
//! the zombie perceives each tick and act on what it returns; nothing here
//! touches the ECS, so every transition can be tested directly.

use bevy::prelude::*;

use super::components::ZombieStats;

/// AI state machine for zombie behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    /// Standing still, waiting for the player to come within detection radius.
    #[default]
    Idle,
    /// Moving toward the player.
    Chasing,
    /// Locked in an attack.
    Attacking,
    /// Terminal.
    Dead,
}

/// What a zombie knows about the player this tick.
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    /// Vector from the zombie to the player
    pub to_player: Vec2,
    pub player_alive: bool,
    /// Knockback has suspended the zombie's own movement
    pub movement_locked: bool,
    /// Centre distance at which an attack may start, see `ZombieStats::attack_reach`
    pub attack_reach: f32,
}

/// What a zombie decided to do this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrainOutput {
    /// Displacement toward the player
    pub step: Vec2,
    /// The attack's damage point was reached and the player is alive
    pub strike: bool,
    pub attack_started: bool,
    pub attack_finished: bool,
}

#[derive(Component, Debug, Clone)]
pub struct ZombieBrain {
    state: AiState,
    base_detection_radius: f32,
    detection_radius: f32,
    alert_remaining: f32,
    attack_elapsed: f32,
    damage_dealt: bool,
    next_attack_time: f32,
}

impl ZombieBrain {
    pub fn new(stats: &ZombieStats) -> Self {
        Self {
            state: AiState::Idle,
            base_detection_radius: stats.detection_radius,
            detection_radius: stats.detection_radius,
            alert_remaining: 0.0,
            attack_elapsed: 0.0,
            damage_dealt: false,
            next_attack_time: 0.0,
        }
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn detection_radius(&self) -> f32 {
        self.detection_radius
    }

    pub fn next_attack_time(&self) -> f32 {
        self.next_attack_time
    }

    pub fn is_alerted(&self) -> bool {
        self.alert_remaining > 0.0
    }

    /// Raise the detection radius and (re)start the alert timer.
    ///
    /// An idle zombie starts chasing. Returns false for dead zombies.
    pub fn alert(&mut self, stats: &ZombieStats) -> bool {
        if self.state == AiState::Dead {
            return false;
        }
        self.detection_radius = stats.alerted_radius;
        self.alert_remaining = stats.alert_duration;
        if self.state == AiState::Idle {
            self.state = AiState::Chasing;
        }
        true
    }

    /// Enter the terminal state, dropping any attack or alert in progress.
    ///
    /// Returns true only the first time.
    pub fn kill(&mut self) -> bool {
        if self.state == AiState::Dead {
            return false;
        }
        self.state = AiState::Dead;
        self.alert_remaining = 0.0;
        self.detection_radius = self.base_detection_radius;
        self.attack_elapsed = 0.0;
        self.damage_dealt = true;
        true
    }

    /// Advance the state machine by `dt` at time `now`.
    pub fn think(
        &mut self,
        stats: &ZombieStats,
        now: f32,
        dt: f32,
        perception: Perception,
    ) -> BrainOutput {
        let mut output = BrainOutput::default();
        if self.state == AiState::Dead {
            return output;
        }

        self.tick_alert(dt);
        let distance = perception.to_player.length();

        if self.state == AiState::Attacking {
            self.attack_elapsed += dt;

            // Damage lands once, judged against the player's state right now
            if !self.damage_dealt && self.attack_elapsed >= stats.wind_up_time {
                self.damage_dealt = true;
                output.strike = perception.player_alive;
            }

            if self.attack_elapsed >= stats.total_attack_time.max(stats.wind_up_time) {
                self.state = AiState::Chasing;
                self.next_attack_time = now + stats.attack_delay;
                output.attack_finished = true;
            }
        }

        match self.state {
            AiState::Idle if perception.player_alive && distance <= self.detection_radius => {
                self.state = AiState::Chasing;
            }
            AiState::Chasing if !perception.player_alive || distance > self.detection_radius => {
                self.state = AiState::Idle;
            }
            _ => {}
        }

        if self.state == AiState::Chasing
            && distance <= perception.attack_reach
            && now >= self.next_attack_time
        {
            self.state = AiState::Attacking;
            self.attack_elapsed = 0.0;
            self.damage_dealt = false;
            output.attack_started = true;
        }

        let moving = match self.state {
            AiState::Chasing => true,
            AiState::Attacking => !stats.stop_while_attacking,
            _ => false,
        };
        if moving && !perception.movement_locked && distance > f32::EPSILON {
            // Never overshoot the player
            let travel = (stats.move_speed * dt).min(distance);
            output.step = perception.to_player / distance * travel;
        }

        output
    }

    fn tick_alert(&mut self, dt: f32) {
        if self.alert_remaining <= 0.0 {
            return;
        }
        self.alert_remaining -= dt;
        if self.alert_remaining <= 0.0 {
            self.alert_remaining = 0.0;
            self.detection_radius = self.base_detection_radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.1;

    fn stats() -> ZombieStats {
        ZombieStats {
            damage: 10,
            move_speed: 2.0,
            detection_radius: 5.0,
            alerted_radius: 15.0,
            alert_range: 5.0,
            alert_duration: 2.0,
            attack_range: 1.0,
            attack_delay: 1.0,
            wind_up_time: 0.3,
            total_attack_time: 1.0,
            stop_while_attacking: true,
            infects: false,
            knockback_force: 0.0,
            radius: 0.35,
        }
    }

    fn sees(x: f32) -> Perception {
        Perception {
            to_player: Vec2::new(x, 0.0),
            player_alive: true,
            movement_locked: false,
            attack_reach: 1.0,
        }
    }

    #[test]
    fn test_idle_until_player_in_radius() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);

        let out = brain.think(&stats, 0.0, DT, sees(8.0));
        assert_eq!(brain.state(), AiState::Idle);
        assert_eq!(out.step, Vec2::ZERO);

        let out = brain.think(&stats, 0.1, DT, sees(4.0));
        assert_eq!(brain.state(), AiState::Chasing);
        assert!((out.step - Vec2::new(0.2, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_ignores_dead_player() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        let dead = Perception {
            player_alive: false,
            ..sees(2.0)
        };

        brain.think(&stats, 0.0, DT, dead);
        assert_eq!(brain.state(), AiState::Idle);

        brain.think(&stats, 0.1, DT, sees(2.0));
        assert_eq!(brain.state(), AiState::Chasing);
        brain.think(&stats, 0.2, DT, dead);
        assert_eq!(brain.state(), AiState::Idle);
    }

    #[test]
    fn test_gives_up_when_player_escapes() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        brain.think(&stats, 0.0, DT, sees(4.0));
        brain.think(&stats, 0.1, DT, sees(6.0));
        assert_eq!(brain.state(), AiState::Idle);
    }

    #[test]
    fn test_attack_cycle_strikes_once_at_wind_up() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);

        let out = brain.think(&stats, 0.0, DT, sees(0.5));
        assert!(out.attack_started);
        assert_eq!(brain.state(), AiState::Attacking);
        assert_eq!(out.step, Vec2::ZERO);

        let mut strikes = 0;
        let mut now = 0.0;
        let mut finished_at = None;
        for _ in 0..20 {
            now += DT;
            let out = brain.think(&stats, now, DT, sees(0.5));
            if out.strike {
                strikes += 1;
                assert!(now >= 0.3 - 1e-4);
            }
            if out.attack_finished {
                finished_at = Some(now);
                break;
            }
        }

        assert_eq!(strikes, 1);
        let finished_at = finished_at.unwrap();
        assert_eq!(brain.state(), AiState::Chasing);
        assert!((brain.next_attack_time() - (finished_at + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_attack_delay_separates_attacks() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        let mut now = 0.0;
        brain.think(&stats, now, DT, sees(0.5));
        while brain.state() == AiState::Attacking {
            now += DT;
            brain.think(&stats, now, DT, sees(0.5));
        }

        let finished = now;
        now += DT;
        let out = brain.think(&stats, now, DT, sees(0.5));
        assert!(!out.attack_started);

        now = finished + 1.0 + DT;
        let out = brain.think(&stats, now, DT, sees(0.5));
        assert!(out.attack_started);
    }

    #[test]
    fn test_player_death_during_wind_up_cancels_strike() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        brain.think(&stats, 0.0, DT, sees(0.5));
        brain.think(&stats, 0.1, DT, sees(0.5));

        let dead = Perception {
            player_alive: false,
            ..sees(0.5)
        };
        let mut struck = false;
        for i in 2..12 {
            struck |= brain.think(&stats, i as f32 * DT, DT, dead).strike;
        }
        assert!(!struck);
        assert_eq!(brain.state(), AiState::Idle);
    }

    #[test]
    fn test_keeps_moving_while_attacking_when_configured() {
        let stats = ZombieStats {
            stop_while_attacking: false,
            ..stats()
        };
        let mut brain = ZombieBrain::new(&stats);
        let out = brain.think(&stats, 0.0, DT, sees(0.9));
        assert!(out.attack_started);
        assert!(out.step.x > 0.0);
    }

    #[test]
    fn test_knockback_suspends_movement_only() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        let locked = Perception {
            movement_locked: true,
            ..sees(3.0)
        };
        let out = brain.think(&stats, 0.0, DT, locked);
        assert_eq!(brain.state(), AiState::Chasing);
        assert_eq!(out.step, Vec2::ZERO);
    }

    #[test]
    fn test_alert_raises_radius_then_reverts() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        assert!(brain.alert(&stats));
        assert_eq!(brain.detection_radius(), 15.0);
        assert_eq!(brain.state(), AiState::Chasing);

        // Player 10 away is inside the alerted radius
        brain.think(&stats, 0.0, 1.0, sees(10.0));
        assert_eq!(brain.state(), AiState::Chasing);

        brain.think(&stats, 1.0, 1.5, sees(10.0));
        assert_eq!(brain.detection_radius(), 5.0);
        assert_eq!(brain.state(), AiState::Idle);
    }

    #[test]
    fn test_repeated_alerts_restart_timer() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        brain.alert(&stats);
        brain.think(&stats, 0.0, 1.5, sees(10.0));
        brain.alert(&stats);
        brain.think(&stats, 1.5, 1.5, sees(10.0));
        assert_eq!(brain.detection_radius(), 15.0);
        assert!(brain.is_alerted());
    }

    #[test]
    fn test_death_is_terminal() {
        let stats = stats();
        let mut brain = ZombieBrain::new(&stats);
        brain.think(&stats, 0.0, DT, sees(0.5));
        assert!(brain.kill());
        assert!(!brain.kill());
        assert!(!brain.alert(&stats));

        let out = brain.think(&stats, 0.5, DT, sees(0.5));
        assert_eq!(out, BrainOutput::default());
        assert_eq!(brain.state(), AiState::Dead);
    }
}
