//! Follow camera and the visible-area resource spawn placement reads.

use bevy::prelude::*;

use crate::core::InputSnapshot;
use crate::player::Player;

/// World units per screen pixel.
const CAMERA_SCALE: f32 = 1.0 / 32.0;
const FOLLOW_SMOOTH_TIME: f32 = 0.25;
/// Cursor offset is divided by this before clamping
const CURSOR_INFLUENCE: f32 = 5.0;
const MAX_CURSOR_OFFSET: f32 = 3.0;

#[derive(Component)]
pub struct MainCamera;

/// World-space rectangle currently on screen.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraView(pub Rect);

impl Default for CameraView {
    fn default() -> Self {
        Self(Rect::from_center_size(Vec2::ZERO, Vec2::new(40.0, 22.5)))
    }
}

pub fn spawn_camera(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        MainCamera,
        Camera2d,
        OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(position.extend(100.0)),
    ));
}

/// Where the camera wants to be: on the player, nudged toward the cursor.
pub fn follow_target(player: Vec2, aim_point: Option<Vec2>) -> Vec2 {
    let offset = aim_point
        .map(|aim| ((aim - player) / CURSOR_INFLUENCE).clamp_length_max(MAX_CURSOR_OFFSET))
        .unwrap_or(Vec2::ZERO);
    player + offset
}

pub(super) fn follow_player(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    player_query: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    let target = follow_target(player.translation.truncate(), input.aim_point);
    let blend = 1.0 - (-time.delta_secs() / FOLLOW_SMOOTH_TIME).exp();
    let position = camera.translation.truncate().lerp(target, blend);
    camera.translation.x = position.x;
    camera.translation.y = position.y;
}

pub(super) fn update_camera_view(
    camera_query: Query<(&Transform, &OrthographicProjection), With<MainCamera>>,
    mut view: ResMut<CameraView>,
) {
    let Ok((transform, projection)) = camera_query.get_single() else {
        return;
    };
    let center = transform.translation.truncate();
    view.0 = Rect {
        min: projection.area.min + center,
        max: projection.area.max + center,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_without_cursor_is_player() {
        assert_eq!(follow_target(Vec2::new(3.0, 4.0), None), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_cursor_offset_is_scaled_and_clamped() {
        let near = follow_target(Vec2::ZERO, Some(Vec2::new(5.0, 0.0)));
        assert!((near - Vec2::new(1.0, 0.0)).length() < 1e-5);

        let far = follow_target(Vec2::ZERO, Some(Vec2::new(100.0, 0.0)));
        assert!((far - Vec2::new(MAX_CURSOR_OFFSET, 0.0)).length() < 1e-5);
    }
}
