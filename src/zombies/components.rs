//! Zombie-related components.

use bevy::prelude::*;

use crate::world::contact_distance;

/// Marker component for all zombies.
#[derive(Component)]
pub struct Zombie;

/// Archetype identifier (matches the RON file stem).
#[derive(Component, Clone, Debug)]
pub struct ZombieArchetype(pub String);

/// Per-archetype behaviour stats.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct ZombieStats {
    /// Damage dealt when an attack lands
    pub damage: i32,
    /// Units per second while chasing
    pub move_speed: f32,
    /// Detection radius when calm
    pub detection_radius: f32,
    /// Detection radius while alerted
    pub alerted_radius: f32,
    /// Radius in which taking damage alerts other zombies
    pub alert_range: f32,
    /// Seconds an alert lasts
    pub alert_duration: f32,
    pub attack_range: f32,
    /// Cooldown after an attack ends
    pub attack_delay: f32,
    /// Seconds into an attack when damage lands
    pub wind_up_time: f32,
    /// Seconds an attack lasts in total
    pub total_attack_time: f32,
    pub stop_while_attacking: bool,
    /// Landed attacks infect the player
    pub infects: bool,
    /// Push applied to the player when an attack lands
    pub knockback_force: f32,
    /// Collider radius
    pub radius: f32,
}

impl Default for ZombieStats {
    fn default() -> Self {
        Self {
            damage: 10,
            move_speed: 2.0,
            detection_radius: 5.0,
            alerted_radius: 15.0,
            alert_range: 5.0,
            alert_duration: 15.0,
            attack_range: 0.9,
            attack_delay: 1.0,
            wind_up_time: 0.3,
            total_attack_time: 1.0,
            stop_while_attacking: true,
            infects: true,
            knockback_force: 5.0,
            radius: 0.35,
        }
    }
}

impl ZombieStats {
    /// Centre distance at which an attack against a player of `player_radius` may start.
    ///
    /// Never shorter than the distance the two colliders settle at, so a
    /// zombie pressed against the player can always attack.
    pub fn attack_reach(&self, player_radius: f32) -> f32 {
        self.attack_range.max(contact_distance(self.radius, player_radius))
    }
}

/// Timer for how long a corpse stays before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl DeathTimer {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds.max(0.0), TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerConfig;

    #[test]
    fn test_attack_reach_covers_collider_contact() {
        let player = PlayerConfig::default();
        let stats = ZombieStats {
            attack_range: 0.5,
            ..default()
        };
        let contact = contact_distance(stats.radius, player.radius);
        assert_eq!(stats.attack_reach(player.radius), contact);
        assert!(stats.attack_reach(player.radius) > stats.radius + player.radius);
    }

    #[test]
    fn test_attack_reach_keeps_longer_range() {
        let stats = ZombieStats {
            attack_range: 2.0,
            ..default()
        };
        assert_eq!(stats.attack_reach(0.4), 2.0);
    }
}
