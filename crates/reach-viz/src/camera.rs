//! Camera setup and world/engine coordinate conversion.
//!
//! The arm lives in `nalgebra` world units; Bevy works in `Vec2`. One world
//! unit spans [`ViewConfig::zoom`] pixels.

use bevy::prelude::*;
use nalgebra::Point2;

use reach_core::config::ViewConfig;

/// Marker for the camera used to map the cursor into world space.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ArmCamera;

/// Spawn an orthographic 2D camera looking at the origin.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_camera(mut commands: Commands, view: Res<ViewConfig>) {
    commands.spawn((
        Camera2d,
        ArmCamera,
        Projection::from(OrthographicProjection {
            scale: 1.0 / view.zoom,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub fn point_to_vec2(p: Point2<f32>) -> Vec2 {
    Vec2::new(p.x, p.y)
}

pub fn vec2_to_point(v: Vec2) -> Point2<f32> {
    Point2::new(v.x, v.y)
}
