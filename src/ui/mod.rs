//! User interface - HUD and overlays.

mod hud;
mod plugin;

pub use hud::{HealthBar, HudRoot};
pub use plugin::UiPlugin;
