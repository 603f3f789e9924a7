//! World module - arena layout, scene queries and the camera.

mod arena;
mod builder;
mod camera;
mod plugin;
mod query;

pub use arena::{ArenaConfig, Bounds, ItemPlacement, Obstacle};
pub use builder::ArenaGeometry;
pub use camera::{follow_target, CameraView, MainCamera};
pub use plugin::WorldPlugin;
pub use query::{
    character_controller, collision_groups, contact_distance, layers, QueryMask, RapierSpatialQuery,
    RayHit, SpatialQuery, CONTROLLER_OFFSET,
};

#[cfg(test)]
pub use query::testing;
