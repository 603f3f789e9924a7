//! Droppable items and their placement in the world.

use bevy::prelude::*;
use serde::Deserialize;

const ITEM_SIZE: f32 = 0.5;

/// Everything the player can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ItemType {
    Vaccine,
    SubMachineGun,
    Ak47,
    Knife,
    Axe,
    Flamethrower,
}

impl ItemType {
    /// Loadout slot a weapon item selects. `None` for consumables.
    pub fn weapon_slot(self) -> Option<usize> {
        match self {
            ItemType::Vaccine => None,
            ItemType::SubMachineGun => Some(0),
            ItemType::Ak47 => Some(1),
            ItemType::Knife => Some(2),
            ItemType::Axe => Some(3),
            ItemType::Flamethrower => Some(4),
        }
    }

    fn color(self) -> Color {
        match self {
            ItemType::Vaccine => Color::srgb(0.3, 0.8, 1.0),
            ItemType::SubMachineGun | ItemType::Ak47 => Color::srgb(0.6, 0.6, 0.6),
            ItemType::Knife | ItemType::Axe => Color::srgb(0.8, 0.7, 0.5),
            ItemType::Flamethrower => Color::srgb(1.0, 0.5, 0.1),
        }
    }
}

/// An item lying in the world.
#[derive(Component, Debug, Clone)]
pub struct DroppableItem {
    pub item_type: ItemType,
    pub pickup_range: f32,
}

/// Spawn a pickup at `position`.
pub fn spawn_item(commands: &mut Commands, item_type: ItemType, position: Vec2, pickup_range: f32) -> Entity {
    commands
        .spawn((
            Name::new(format!("{:?}", item_type)),
            DroppableItem {
                item_type,
                pickup_range,
            },
            Sprite {
                color: item_type.color(),
                custom_size: Some(Vec2::splat(ITEM_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.8)),
        ))
        .id()
}

/// Closest item whose own range strictly contains the player.
pub fn nearest_item(player: Vec2, items: impl IntoIterator<Item = (Entity, Vec2, f32)>) -> Option<Entity> {
    items
        .into_iter()
        .map(|(entity, position, range)| (entity, position.distance(player), range))
        .filter(|(_, distance, range)| distance < range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _, _)| entity)
}
