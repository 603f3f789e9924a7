//! Global events used for cross-system communication.
//!
//! The simulation never talks to audio, animation or UI directly. It sends
//! one-way notifications through these events and whatever presentation
//! layer is installed listens for them.

use bevy::prelude::*;

/// A push applied to a hit entity, locking its movement for `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    /// Unit direction of the push
    pub direction: Vec2,
    /// Initial push speed in units per second
    pub force: f32,
    /// Seconds the target's own movement stays suspended
    pub duration: f32,
}

/// Sent when something wants to damage an entity.
///
/// The damage system listens for these events and applies them to the
/// target's `Health`. Negative amounts heal.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (if any)
    pub source: Option<Entity>,
    /// Damage amount, negative to heal
    pub amount: i32,
    /// Optional push applied with the hit
    pub knockback: Option<Impulse>,
}

/// Sent after a `DamageEvent` was applied to a living target.
#[derive(Event, Debug, Clone)]
pub struct HitEvent {
    pub entity: Entity,
    pub source: Option<Entity>,
    pub amount: i32,
    /// Whether this hit brought health to zero
    pub lethal: bool,
    pub knockback: Option<Impulse>,
}

/// Sent on every damage application, even when the clamped value is unchanged.
#[derive(Event, Debug, Clone)]
pub struct HealthChangedEvent {
    pub entity: Entity,
    pub current: i32,
    pub maximum: i32,
}

/// Sent exactly once when an entity's health reaches 0.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when the player's infection status flips.
#[derive(Event, Debug, Clone)]
pub struct InfectionChangedEvent {
    pub entity: Entity,
    pub infected: bool,
}

/// Sent when a zombie attack should infect its target.
#[derive(Event, Debug, Clone)]
pub struct InfectEvent {
    pub target: Entity,
}

/// Sent when the player's active weapon changes.
#[derive(Event, Debug, Clone)]
pub struct WeaponSwitchedEvent {
    pub previous: Option<usize>,
    pub current: usize,
}

/// Named sound clips the simulation can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoundClip {
    /// A weapon's own clip, named in its data file
    Weapon(String),
    FlameIgnite,
    ZombieHit,
    ZombieDeath,
    Infection,
    VaccinePickup,
    WeaponPickup,
}

impl SoundClip {
    /// Asset path of the clip under `assets/`.
    pub fn asset_path(&self) -> String {
        let name = match self {
            SoundClip::Weapon(name) => name.as_str(),
            SoundClip::FlameIgnite => "flame_ignite",
            SoundClip::ZombieHit => "hit_flesh",
            SoundClip::ZombieDeath => "zombie_death",
            SoundClip::Infection => "infection",
            SoundClip::VaccinePickup => "vaccine_pickup",
            SoundClip::WeaponPickup => "weapon_pickup",
        };
        format!("audio/{}.ogg", name)
    }
}

/// Fire-and-forget request to play a sound.
#[derive(Event, Debug, Clone)]
pub struct PlaySoundEvent {
    pub clip: SoundClip,
    pub volume: f32,
}

impl PlaySoundEvent {
    pub fn new(clip: SoundClip, volume: f32) -> Self {
        Self { clip, volume }
    }
}

/// Eight-way facing used by sprite presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compass {
    #[default]
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
}

impl Compass {
    /// Quantize a direction into one of eight 45 degree sectors.
    ///
    /// Returns `None` for a zero vector.
    pub fn from_vector(direction: Vec2) -> Option<Self> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }
        let mut degrees = direction.y.atan2(direction.x).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        let sector = ((degrees + 22.5) / 45.0).floor() as i32 % 8;
        Some(match sector {
            0 => Compass::East,
            1 => Compass::NorthEast,
            2 => Compass::North,
            3 => Compass::NorthWest,
            4 => Compass::West,
            5 => Compass::SouthWest,
            6 => Compass::South,
            _ => Compass::SouthEast,
        })
    }
}

/// One-way notifications for animation/presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorCue {
    DirectionChanged(Compass),
    AttackStarted,
    AttackStopped,
    Damaged,
    Died,
}

/// Sent whenever an actor does something presentation may want to show.
#[derive(Event, Debug, Clone)]
pub struct ActorCueEvent {
    pub entity: Entity,
    pub cue: ActorCue,
}

/// Sent every time the match timer changes.
#[derive(Event, Debug, Clone)]
pub struct TimeLeftChangedEvent {
    pub time_left: i32,
}

/// Sent when the kill count changes.
#[derive(Event, Debug, Clone)]
pub struct ScoreChangedEvent {
    pub kills: u32,
}

/// Sent once per difficulty milestone.
#[derive(Event, Debug, Clone)]
pub struct WaveNotificationEvent {
    pub wave: u32,
    pub message: String,
}

/// Sent exactly once when the match ends.
#[derive(Event, Debug, Clone)]
pub struct GameOverEvent {
    pub won: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_sectors() {
        assert_eq!(Compass::from_vector(Vec2::X), Some(Compass::East));
        assert_eq!(Compass::from_vector(Vec2::Y), Some(Compass::North));
        assert_eq!(Compass::from_vector(-Vec2::X), Some(Compass::West));
        assert_eq!(Compass::from_vector(-Vec2::Y), Some(Compass::South));
        assert_eq!(Compass::from_vector(Vec2::new(1.0, 1.0)), Some(Compass::NorthEast));
        assert_eq!(Compass::from_vector(Vec2::new(1.0, -1.0)), Some(Compass::SouthEast));
        assert_eq!(Compass::from_vector(Vec2::ZERO), None);
    }

    #[test]
    fn test_clip_paths() {
        assert_eq!(SoundClip::ZombieHit.asset_path(), "audio/hit_flesh.ogg");
        assert_eq!(SoundClip::Weapon("ak47".into()).asset_path(), "audio/ak47.ogg");
    }
}
