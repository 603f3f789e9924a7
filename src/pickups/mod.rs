//! Droppable items and what picking them up does.

mod items;
mod plugin;
mod resolution;
mod systems;

pub use items::{nearest_item, spawn_item, DroppableItem, ItemType};
pub use plugin::PickupPlugin;
pub use resolution::{resolve_pickup, PickupEffect, PickupError};
