//! Per-tick input snapshot.
//!
//! Gameplay systems read `InputSnapshot` and never poll devices themselves,
//! so tests can drive the simulation by writing the resource directly.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

const WEAPON_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Everything the simulation needs to know about the player's intent this tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Normalized movement direction (zero when idle)
    pub movement: Vec2,
    /// Cursor position in world space, if the cursor is over the window
    pub aim_point: Option<Vec2>,
    /// Fire control went down this tick
    pub fire_pressed: bool,
    /// Fire control is held
    pub fire_held: bool,
    /// Pickup requested this tick
    pub pickup: bool,
    /// Weapon slot requested this tick
    pub switch_weapon: Option<usize>,
    /// Pause toggle requested this tick
    pub pause: bool,
}

impl InputSnapshot {
    /// Unit aim direction from `origin` toward the cursor.
    pub fn aim_from(&self, origin: Vec2) -> Option<Vec2> {
        let direction = (self.aim_point? - origin).normalize_or_zero();
        (direction != Vec2::ZERO).then_some(direction)
    }
}

/// Sample keyboard and mouse into the snapshot.
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    let mut movement = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        movement.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        movement.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        movement.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        movement.x += 1.0;
    }

    // Project the cursor into world space
    let aim_point = match (window_query.get_single(), camera_query.get_single()) {
        (Ok(window), Ok((camera, camera_transform))) => window
            .cursor_position()
            .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok()),
        _ => None,
    };

    *snapshot = InputSnapshot {
        movement: movement.normalize_or_zero(),
        aim_point,
        fire_pressed: mouse.just_pressed(MouseButton::Left),
        fire_held: mouse.pressed(MouseButton::Left),
        pickup: keyboard.just_pressed(KeyCode::KeyC),
        switch_weapon: WEAPON_KEYS.iter().position(|key| keyboard.just_pressed(*key)),
        pause: keyboard.just_pressed(KeyCode::Escape),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_direction_is_normalized() {
        let snapshot = InputSnapshot {
            aim_point: Some(Vec2::new(3.0, 4.0)),
            ..default()
        };
        let aim = snapshot.aim_from(Vec2::ZERO).unwrap();
        assert!((aim - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_aim_at_origin_is_none() {
        let snapshot = InputSnapshot {
            aim_point: Some(Vec2::ONE),
            ..default()
        };
        assert!(snapshot.aim_from(Vec2::ONE).is_none());
        assert!(InputSnapshot::default().aim_from(Vec2::ZERO).is_none());
    }
}
