//! Wave plugin - registers wave config loading and spawning.

use bevy::prelude::*;

use super::config::{WavesConfig, WAVES_PATH};
use super::spawner::WaveSpawner;
use super::supply::SupplyDrop;
use super::systems::setup_wave_systems;
use crate::core::load_or_default;

pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WavesConfig>()
            .init_resource::<WaveSpawner>()
            .init_resource::<SupplyDrop>()
            .add_systems(Startup, load_waves);

        setup_wave_systems(app);
    }
}

fn load_waves(mut commands: Commands) {
    let config: WavesConfig = load_or_default(WAVES_PATH);
    if config.presets.is_empty() {
        warn!("{} defines no wave presets", WAVES_PATH);
    }
    info!(
        "Loaded {} wave presets and {} milestones",
        config.presets.len(),
        config.milestones.len()
    );
    commands.insert_resource(config);
}
