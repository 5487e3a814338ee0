//! Gizmo rendering of the arm and its target.

use bevy::prelude::*;

use reach_core::config::ViewConfig;
use reach_ik::{ArmChain, compute_joints};

use crate::camera::point_to_vec2;

/// Colors used to draw the arm.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ArmPalette {
    pub segment: Color,
    pub joint: Color,
    pub target: Color,
}

impl Default for ArmPalette {
    fn default() -> Self {
        Self {
            segment: Color::srgb_u8(245, 245, 245),
            joint: Color::srgb_u8(230, 41, 55),
            target: Color::srgb_u8(0, 158, 47),
        }
    }
}

/// Segment endpoints of the current arm pose, root first.
pub fn arm_segments(arm: &ArmChain) -> Vec<(Vec2, Vec2)> {
    compute_joints(arm.chain())
        .windows(2)
        .map(|pair| (point_to_vec2(pair[0]), point_to_vec2(pair[1])))
        .collect()
}

/// Apply the configured line width to the default gizmo group.
#[allow(clippy::needless_pass_by_value)]
pub fn configure_gizmos(mut store: ResMut<GizmoConfigStore>, view: Res<ViewConfig>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = view.line_width;
}

/// Draw every segment as a line, every joint as a circle, and the target as
/// a small cross.
#[allow(clippy::needless_pass_by_value)]
pub fn draw_arm_system(
    mut gizmos: Gizmos,
    arm: Option<Res<ArmChain>>,
    view: Res<ViewConfig>,
    palette: Res<ArmPalette>,
) {
    let Some(arm) = arm else {
        return;
    };

    for (start, end) in arm_segments(&arm) {
        gizmos.line_2d(start, end, palette.segment);
    }
    for joint in compute_joints(arm.chain()) {
        gizmos.circle_2d(point_to_vec2(joint), view.joint_radius, palette.joint);
    }

    let target = point_to_vec2(arm.chain().target());
    if target.is_finite() {
        let half = view.joint_radius;
        gizmos.line_2d(target - Vec2::X * half, target + Vec2::X * half, palette.target);
        gizmos.line_2d(target - Vec2::Y * half, target + Vec2::Y * half, palette.target);
    }
}
