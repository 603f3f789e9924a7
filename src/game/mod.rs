//! Match controller.

mod exit;
mod plugin;
mod state;
mod systems;

pub use exit::ExitZone;
pub use plugin::GamePlugin;
pub use state::{format_clock, MatchConfig, MatchOutcome, MatchState};
pub use systems::exit_zone_color;

#[cfg(test)]
pub(crate) use systems::count_kills;
