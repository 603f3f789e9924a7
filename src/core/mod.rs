//! Core game module - states, events, input, and data loading.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod input;
mod plugin;
mod states;

pub use data::{load_or_default, load_ron};
pub use error::DataLoadError;
pub use events::*;
pub use input::InputSnapshot;
pub use plugin::CorePlugin;
pub use states::*;
