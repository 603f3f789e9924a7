//! Scene queries the simulation needs from physics.
//!
//! Gameplay rules only see the `SpatialQuery` trait. The running game backs
//! it with Rapier; tests back it with a handful of circles.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Collision layer bits shared by colliders and queries.
pub mod layers {
    pub const PLAYER: u32 = 1 << 0;
    pub const ZOMBIE: u32 = 1 << 1;
    pub const OBSTACLE: u32 = 1 << 2;
    pub const ALL: u32 = u32::MAX;
}

/// Which colliders a query may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryMask {
    /// Layer bits a collider must belong to
    pub layers: u32,
    /// Collider to ignore (usually the querying entity)
    pub exclude: Option<Entity>,
    /// Skip sensors/triggers
    pub solids_only: bool,
}

impl QueryMask {
    pub fn new(layers: u32) -> Self {
        Self {
            layers,
            exclude: None,
            solids_only: false,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }

    pub fn solids(mut self) -> Self {
        self.solids_only = true;
        self
    }

    fn to_filter(self) -> QueryFilter<'static> {
        let mut filter = QueryFilter::default().groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(self.layers),
        ));
        if self.solids_only {
            filter = filter.exclude_sensors();
        }
        if let Some(entity) = self.exclude {
            filter = filter.exclude_collider(entity);
        }
        filter
    }
}

/// First collider along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Pure scene queries against external collision data.
pub trait SpatialQuery {
    /// Closest collider hit by a ray from `origin` along unit `direction`.
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: QueryMask) -> Option<RayHit>;

    /// Every collider along the ray, nearest first.
    fn raycast_all(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: QueryMask) -> Vec<RayHit>;

    /// Every collider overlapping the circle.
    fn overlap_circle(&self, point: Vec2, radius: f32, mask: QueryMask) -> Vec<Entity>;
}

/// `SpatialQuery` backed by the Rapier scene.
pub struct RapierSpatialQuery<'a> {
    context: &'a RapierContext,
}

impl<'a> RapierSpatialQuery<'a> {
    pub fn new(context: &'a RapierContext) -> Self {
        Self { context }
    }
}

impl SpatialQuery for RapierSpatialQuery<'_> {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: QueryMask) -> Option<RayHit> {
        self.context
            .cast_ray(origin, direction, max_distance, true, mask.to_filter())
            .map(|(entity, distance)| RayHit { entity, distance })
    }

    fn raycast_all(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: QueryMask) -> Vec<RayHit> {
        let mut hits = Vec::new();
        self.context.intersections_with_ray(
            origin,
            direction,
            max_distance,
            true,
            mask.to_filter(),
            |entity, intersection| {
                hits.push(RayHit {
                    entity,
                    distance: intersection.time_of_impact,
                });
                true
            },
        );
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn overlap_circle(&self, point: Vec2, radius: f32, mask: QueryMask) -> Vec<Entity> {
        let mut hits = Vec::new();
        let shape = Collider::ball(radius);
        self.context
            .intersections_with_shape(point, 0.0, &shape, mask.to_filter(), |entity| {
                hits.push(entity);
                true // Continue checking other entities
            });
        hits
    }
}

/// Collision groups for a collider on `layer` that interacts with everything.
pub fn collision_groups(layer: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(layer), Group::ALL)
}

/// Gap the character controllers keep between their collider and others.
pub const CONTROLLER_OFFSET: f32 = 0.01;

/// Character controller shared by every walking actor. Sensors never block.
pub fn character_controller() -> KinematicCharacterController {
    KinematicCharacterController {
        offset: CharacterLength::Absolute(CONTROLLER_OFFSET),
        filter_flags: QueryFilterFlags::EXCLUDE_SENSORS,
        ..default()
    }
}

/// Closest centre distance two controller-driven balls settle at.
///
/// Counts the offset of both controllers so either one may be the mover.
pub fn contact_distance(radius_a: f32, radius_b: f32) -> f32 {
    radius_a + radius_b + 2.0 * CONTROLLER_OFFSET
}
