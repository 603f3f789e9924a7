//! Choosing where zombies and supply drops appear.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::world::{layers, QueryMask, SpatialQuery};

/// Tunables for off-screen spawn placement.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Keep spawns this far inside the map bounds
    pub margin: f32,
    /// How far past the camera edge to spawn
    pub view_buffer: f32,
    /// Closer than this to the player gets pushed out
    pub min_player_distance: f32,
    /// Distance from the player after a push
    pub push_distance: f32,
    /// Radius that must be free of solid non-zombie colliders
    pub clearance: f32,
    /// Extra attempts after the first invalid position
    pub retries: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 2.0,
            view_buffer: 5.0,
            min_player_distance: 5.0,
            push_distance: 8.0,
            clearance: 0.5,
            retries: 5,
        }
    }
}

fn range_or_start(rng: &mut impl Rng, start: f32, end: f32) -> f32 {
    if start < end {
        rng.gen_range(start..end)
    } else {
        start
    }
}

fn clamp_inside(position: Vec2, bounds: Rect, margin: f32) -> Vec2 {
    let low = bounds.min + Vec2::splat(margin);
    let high = (bounds.max - Vec2::splat(margin)).max(low);
    position.clamp(low, high)
}

/// A random point just outside one side of the camera view.
pub fn candidate_position(
    view: Rect,
    bounds: Rect,
    player: Option<Vec2>,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Vec2 {
    let inner_min = bounds.min + Vec2::splat(config.margin);
    let inner_max = bounds.max - Vec2::splat(config.margin);
    let buffer = config.view_buffer;

    let (low_x, high_x) = (view.min.x.max(inner_min.x), view.max.x.min(inner_max.x));
    let (low_y, high_y) = (view.min.y.max(inner_min.y), view.max.y.min(inner_max.y));

    let position = match rng.gen_range(0..4) {
        0 => Vec2::new(
            (view.min.x - buffer).max(inner_min.x),
            range_or_start(rng, low_y, high_y),
        ),
        1 => Vec2::new(
            (view.max.x + buffer).min(inner_max.x),
            range_or_start(rng, low_y, high_y),
        ),
        2 => Vec2::new(
            range_or_start(rng, low_x, high_x),
            (view.max.y + buffer).min(inner_max.y),
        ),
        _ => Vec2::new(
            range_or_start(rng, low_x, high_x),
            (view.min.y - buffer).max(inner_min.y),
        ),
    };
    let mut position = clamp_inside(position, bounds, config.margin);

    if let Some(player) = player {
        if position.distance(player) < config.min_player_distance {
            let away = (position - player).try_normalize().unwrap_or(Vec2::Y);
            position = clamp_inside(player + away * config.push_distance, bounds, config.margin);
        }
    }
    position
}

/// Inside the map and clear of solid, non-zombie colliders.
pub fn is_valid_position(position: Vec2, bounds: Rect, world: &impl SpatialQuery, config: &PlacementConfig) -> bool {
    if !bounds.contains(position) {
        return false;
    }
    let mask = QueryMask::new(layers::ALL & !layers::ZOMBIE).solids();
    world.overlap_circle(position, config.clearance, mask).is_empty()
}

/// First valid candidate, or `None` once every attempt is blocked.
pub fn find_spawn_position(
    view: Rect,
    bounds: Rect,
    player: Option<Vec2>,
    world: &impl SpatialQuery,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Option<Vec2> {
    (0..=config.retries)
        .map(|_| candidate_position(view, bounds, player, config, rng))
        .find(|position| is_valid_position(*position, bounds, world, config))
}
