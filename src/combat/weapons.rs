//! Weapon definitions and the player's loadout.

use bevy::prelude::*;
use serde::Deserialize;

use super::flamethrower::FlameEmitter;
use super::melee::{MeleeSwing, SwingFrame};

/// Kind-specific weapon parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum WeaponKind {
    /// Fires projectiles while the trigger is held.
    Firearm {
        projectile_speed: f32,
        projectile_lifetime: f32,
    },
    /// Swings once per trigger press.
    Melee {
        swing_duration: f32,
        reach: f32,
        /// Seconds a struck zombie stays knocked back
        knockback_duration: f32,
    },
    /// Burns a cone in front of the muzzle while held.
    Flamethrower {
        range: f32,
        spread_degrees: f32,
        ray_count: u32,
        tick_interval: f32,
    },
}

/// Immutable per-weapon stats.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WeaponData {
    pub name: String,
    pub kind: WeaponKind,
    /// Shots/swings per second
    pub fire_rate: f32,
    /// Damage per projectile, per swing hit, or per flame tick
    pub damage: i32,
    /// Push applied to struck zombies
    #[serde(default)]
    pub knockback: f32,
    /// Clip name under `assets/audio/`
    #[serde(default)]
    pub sound: Option<String>,
}

impl WeaponData {
    /// Seconds between shots. A non-positive rate falls back to one per second.
    pub fn fire_interval(&self) -> f32 {
        if self.fire_rate > 0.0 {
            1.0 / self.fire_rate
        } else {
            1.0
        }
    }
}

/// Weapons the player carries, in slot order.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct WeaponsConfig {
    pub weapons: Vec<WeaponData>,
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        let firearm = |name: &str, fire_rate, damage| WeaponData {
            name: name.to_string(),
            kind: WeaponKind::Firearm {
                projectile_speed: 30.0,
                projectile_lifetime: 2.0,
            },
            fire_rate,
            damage,
            knockback: 0.0,
            sound: Some(name.to_lowercase()),
        };
        let melee = |name: &str, fire_rate, damage, reach, knockback| WeaponData {
            name: name.to_string(),
            kind: WeaponKind::Melee {
                swing_duration: 0.3,
                reach,
                knockback_duration: 1.0,
            },
            fire_rate,
            damage,
            knockback,
            sound: Some(name.to_lowercase()),
        };

        Self {
            weapons: vec![
                firearm("SubMachineGun", 10.0, 8),
                firearm("Ak47", 6.0, 15),
                melee("Knife", 2.5, 20, 1.2, 3.0),
                melee("Axe", 1.2, 40, 1.6, 6.0),
                WeaponData {
                    name: "Flamethrower".to_string(),
                    kind: WeaponKind::Flamethrower {
                        range: 4.0,
                        spread_degrees: 30.0,
                        ray_count: 8,
                        tick_interval: 0.1,
                    },
                    fire_rate: 10.0,
                    damage: 2,
                    knockback: 0.0,
                    sound: None,
                },
            ],
        }
    }
}

/// Rate limiter for any weapon.
#[derive(Debug, Clone, Default)]
pub struct FireGate {
    next_fire_time: f32,
}

impl FireGate {
    pub fn ready(&self, now: f32) -> bool {
        now >= self.next_fire_time
    }

    /// Consume the gate if open. Returns whether firing is allowed.
    pub fn try_trigger(&mut self, now: f32, interval: f32) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.next_fire_time = now + interval;
        true
    }

    pub fn next_fire_time(&self) -> f32 {
        self.next_fire_time
    }
}

/// State of the fire control this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trigger {
    pub pressed: bool,
    pub held: bool,
}

/// A projectile to spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotSpec {
    pub direction: Vec2,
    pub speed: f32,
    pub lifetime: f32,
    pub damage: i32,
}

/// What the loadout did in response to the trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum FireAction {
    None,
    Shot(ShotSpec),
    SwingStarted,
    FlameIgnited,
    FlameStopped,
}

/// Result of switching weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSwitch {
    pub previous: usize,
    pub current: usize,
    /// A swing in progress was cancelled
    pub swing_cancelled: bool,
    /// The flame was burning and has been put out
    pub flame_stopped: bool,
}

/// The player's weapons, the active slot, and per-weapon timelines.
#[derive(Component, Debug, Clone, Default)]
pub struct Loadout {
    weapons: Vec<WeaponData>,
    current: usize,
    gate: FireGate,
    swing: Option<MeleeSwing>,
    flame: FlameEmitter,
    /// Presentation angle of the held weapon in degrees
    weapon_angle: f32,
}

impl Loadout {
    pub fn new(weapons: Vec<WeaponData>) -> Self {
        Self {
            weapons,
            ..default()
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_weapon(&self) -> Option<&WeaponData> {
        self.weapons.get(self.current)
    }

    pub fn weapon_angle(&self) -> f32 {
        self.weapon_angle
    }

    pub fn swing(&self) -> Option<&MeleeSwing> {
        self.swing.as_ref()
    }

    pub fn swing_mut(&mut self) -> Option<&mut MeleeSwing> {
        self.swing.as_mut()
    }

    pub fn flame_active(&self) -> bool {
        self.flame.is_active()
    }

    /// Make `index` the active weapon. Out-of-range slots are ignored.
    pub fn switch_to(&mut self, index: usize) -> Option<WeaponSwitch> {
        if index >= self.weapons.len() {
            return None;
        }

        // Never leave a swing's damage window open on a holstered weapon
        let swing_cancelled = match self.swing.take() {
            Some(mut swing) => {
                swing.cancel();
                true
            }
            None => false,
        };
        let flame_stopped = self.flame.extinguish();

        let previous = std::mem::replace(&mut self.current, index);
        Some(WeaponSwitch {
            previous,
            current: index,
            swing_cancelled,
            flame_stopped,
        })
    }

    /// Pull (or release) the trigger at `now` aiming along unit `aim`.
    pub fn try_fire(&mut self, now: f32, aim: Vec2, trigger: Trigger) -> FireAction {
        let Some(weapon) = self.weapons.get(self.current) else {
            return FireAction::None;
        };
        let interval = weapon.fire_interval();

        let wants_fire = match weapon.kind {
            WeaponKind::Firearm { .. } | WeaponKind::Flamethrower { .. } => trigger.held,
            WeaponKind::Melee { .. } => trigger.pressed,
        };

        if !wants_fire {
            if matches!(weapon.kind, WeaponKind::Flamethrower { .. }) && self.flame.extinguish() {
                return FireAction::FlameStopped;
            }
            return FireAction::None;
        }

        if !self.gate.try_trigger(now, interval) {
            return FireAction::None;
        }

        match weapon.kind {
            WeaponKind::Firearm {
                projectile_speed,
                projectile_lifetime,
            } => FireAction::Shot(ShotSpec {
                direction: aim,
                speed: projectile_speed,
                lifetime: projectile_lifetime,
                damage: weapon.damage,
            }),
            WeaponKind::Melee { swing_duration, .. } => {
                if let Some(mut old) = self.swing.take() {
                    old.cancel();
                }
                self.swing = Some(MeleeSwing::begin(aim, self.weapon_angle, swing_duration));
                FireAction::SwingStarted
            }
            WeaponKind::Flamethrower { .. } => {
                if self.flame.ignite(now) {
                    FireAction::FlameIgnited
                } else {
                    FireAction::None
                }
            }
        }
    }

    /// Advance the swing timeline and track the aim. Returns the swing frame while swinging.
    pub fn advance(&mut self, dt: f32, aim: Vec2) -> Option<SwingFrame> {
        let aim_angle = aim.y.atan2(aim.x).to_degrees();

        let Some(swing) = self.swing.as_mut() else {
            self.weapon_angle = aim_angle;
            return None;
        };

        let frame = swing.advance(dt, aim_angle);
        self.weapon_angle = frame.angle;
        if swing.is_finished() {
            self.swing = None;
        }
        Some(frame)
    }

    /// Whether the flamethrower owes a damage pulse at `now`.
    pub fn flame_pulse_due(&mut self, now: f32) -> bool {
        let interval = match self.current_weapon().map(|w| &w.kind) {
            Some(WeaponKind::Flamethrower { tick_interval, .. }) => *tick_interval,
            _ => return false,
        };
        self.flame.pulse_due(now, interval)
    }
}
