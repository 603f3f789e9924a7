//! Sound playback for `PlaySoundEvent` requests.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::core::{GameplaySet, PlaySoundEvent};

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_systems(Update, play_requested_sounds.after(GameplaySet::Match));
    }
}

/// Requested volumes may exceed 1.0; playback is capped there.
pub fn playback_volume(requested: f32) -> f64 {
    if requested.is_finite() {
        f64::from(requested.clamp(0.0, 1.0))
    } else {
        0.0
    }
}

fn play_requested_sounds(
    mut sound_events: EventReader<PlaySoundEvent>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for event in sound_events.read() {
        let volume = playback_volume(event.volume);
        if volume <= 0.0 {
            continue;
        }
        audio
            .play(asset_server.load(event.clip.asset_path()))
            .with_volume(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_is_capped() {
        assert_eq!(playback_volume(0.5), 0.5);
        assert_eq!(playback_volume(1.8), 1.0);
        assert_eq!(playback_volume(-1.0), 0.0);
        assert_eq!(playback_volume(f32::NAN), 0.0);
    }
}
