//! Cursor-to-target input mapping.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use reach_ik::ArmChain;

use crate::camera::{ArmCamera, vec2_to_point};

/// Write the cursor's world position as the arm target.
///
/// Leaves the target unchanged when there is no primary window, no arm
/// camera, or the cursor is outside the window.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_target_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ArmCamera>>,
    arm: Option<ResMut<ArmChain>>,
) {
    let Some(mut arm) = arm else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) {
        arm.set_target(vec2_to_point(world));
    }
}
