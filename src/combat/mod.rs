//! Combat module - health, weapons, swings, flames, projectiles and damage.

mod components;
pub mod flamethrower;
mod knockback;
pub mod melee;
mod plugin;
pub mod projectile;
mod systems;
pub mod weapons;

pub use components::*;
pub use knockback::Knockback;
pub use plugin::CombatPlugin;
pub use systems::HeldWeapon;
pub use weapons::{Loadout, WeaponData, WeaponKind, WeaponsConfig};
