//! Player module - movement, aiming, infection and spawning.

mod components;
mod infection;
mod movement;
mod plugin;

pub use components::*;
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
