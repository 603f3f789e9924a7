//! Arena layout data.

use bevy::prelude::*;
use serde::Deserialize;

use crate::pickups::ItemType;

pub const ARENA_PATH: &str = "assets/data/arena.ron";

/// Axis-aligned rectangle as written in data files.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: (f32, f32),
    pub max: (f32, f32),
}

impl Bounds {
    pub fn rect(&self) -> Rect {
        Rect::new(self.min.0, self.min.1, self.max.0, self.max.1)
    }
}

/// Solid box the player and zombies cannot cross.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Obstacle {
    pub center: (f32, f32),
    pub size: (f32, f32),
    #[serde(default = "default_obstacle_color")]
    pub color: (f32, f32, f32),
}

fn default_obstacle_color() -> (f32, f32, f32) {
    (0.35, 0.3, 0.28)
}

/// An item lying on the map at match start.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemPlacement {
    pub item: ItemType,
    pub position: (f32, f32),
    #[serde(default = "default_pickup_range")]
    pub pickup_range: f32,
}

fn default_pickup_range() -> f32 {
    1.5
}

/// Map bounds, obstacles, exit and starting items.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub bounds: Bounds,
    /// Thickness of the walls built just outside `bounds`
    pub wall_thickness: f32,
    pub obstacles: Vec<Obstacle>,
    pub exit: Bounds,
    pub player_spawn: (f32, f32),
    pub items: Vec<ItemPlacement>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let crate_at = |x: f32, y: f32, w: f32, h: f32| Obstacle {
            center: (x, y),
            size: (w, h),
            color: default_obstacle_color(),
        };
        let item = |item: ItemType, x: f32, y: f32| ItemPlacement {
            item,
            position: (x, y),
            pickup_range: default_pickup_range(),
        };
        Self {
            bounds: Bounds {
                min: (-70.0, -70.0),
                max: (70.0, 70.0),
            },
            wall_thickness: 2.0,
            obstacles: vec![
                crate_at(-12.0, 8.0, 6.0, 2.0),
                crate_at(14.0, -10.0, 2.0, 8.0),
                crate_at(30.0, 30.0, 10.0, 3.0),
                crate_at(-35.0, -25.0, 4.0, 12.0),
                crate_at(45.0, -40.0, 8.0, 8.0),
            ],
            exit: Bounds {
                min: (60.0, 60.0),
                max: (66.0, 66.0),
            },
            player_spawn: (0.0, 0.0),
            items: vec![
                item(ItemType::Knife, 3.0, 2.0),
                item(ItemType::Ak47, -25.0, 20.0),
                item(ItemType::Axe, 20.0, -30.0),
                item(ItemType::Flamethrower, -50.0, -50.0),
                item(ItemType::Vaccine, 10.0, 12.0),
            ],
        }
    }
}

impl ArenaConfig {
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.player_spawn.0, self.player_spawn.1)
    }

    /// Center and size of the four walls enclosing the map.
    pub fn boundary_walls(&self) -> [(Vec2, Vec2); 4] {
        let rect = self.bounds.rect();
        let t = self.wall_thickness.max(0.1);
        let width = rect.width() + 2.0 * t;
        let height = rect.height() + 2.0 * t;
        let center = rect.center();
        [
            (Vec2::new(center.x, rect.max.y + t / 2.0), Vec2::new(width, t)),
            (Vec2::new(center.x, rect.min.y - t / 2.0), Vec2::new(width, t)),
            (Vec2::new(rect.min.x - t / 2.0, center.y), Vec2::new(t, height)),
            (Vec2::new(rect.max.x + t / 2.0, center.y), Vec2::new(t, height)),
        ]
    }
}
