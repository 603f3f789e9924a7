//! Pickup plugin.

use bevy::prelude::*;

use super::systems::setup_pickup_systems;

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        setup_pickup_systems(app);
    }
}
