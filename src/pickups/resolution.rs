//! What picking up an item does to the player.

use thiserror::Error;

use super::items::ItemType;
use crate::combat::weapons::{Loadout, WeaponSwitch};
use crate::player::Infection;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickupError {
    #[error("{item:?} selects weapon slot {slot}, but the loadout only has {available} weapons")]
    MissingWeaponSlot {
        item: ItemType,
        slot: usize,
        available: usize,
    },
}

/// Result of a successful pickup.
#[derive(Debug, Clone, PartialEq)]
pub enum PickupEffect {
    /// Heal by `heal` and clear any infection
    Vaccine { cured: bool, heal: i32 },
    Weapon(WeaponSwitch),
}

/// Apply `item` to the player's loadout and infection.
///
/// A weapon item whose slot the loadout does not have is a data mismatch
/// and leaves everything untouched.
pub fn resolve_pickup(
    item: ItemType,
    loadout: &mut Loadout,
    infection: &mut Infection,
    vaccine_heal: i32,
) -> Result<PickupEffect, PickupError> {
    let Some(slot) = item.weapon_slot() else {
        let cured = infection.cure();
        return Ok(PickupEffect::Vaccine {
            cured,
            heal: vaccine_heal,
        });
    };

    loadout
        .switch_to(slot)
        .map(PickupEffect::Weapon)
        .ok_or(PickupError::MissingWeaponSlot {
            item,
            slot,
            available: loadout.len(),
        })
}
