//! Comparison helpers for points and angles.

use std::f32::consts::TAU;

use nalgebra::Point2;

/// Euclidean distance between two points.
pub fn point_distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (b - a).norm()
}

/// Smallest absolute difference between two angles, modulo a full turn.
pub fn angle_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff)
}

/// Largest per-segment [`angle_distance`] between two angle sets.
pub fn max_angle_change(before: &[f32], after: &[f32]) -> f32 {
    before
        .iter()
        .zip(after)
        .map(|(&a, &b)| angle_distance(a, b))
        .fold(0.0, f32::max)
}
