//! Planar chain model and forward kinematics.
//!
//! A [`Chain`] stores per-segment lengths and *relative* angles: the world
//! orientation of segment `i` is the sum of `angles[0..=i]`. Joint positions
//! are never stored; [`compute_joints`] derives them on demand and
//! [`extract_angles`] maps a joint sequence back to relative angles using the
//! same cumulative convention.

use nalgebra::{Point2, Vector2};
use tracing::info;

use reach_core::config::{ArmConfig, validate_arm};
use reach_core::error::ChainError;

/// A single open kinematic chain in the plane.
///
/// Lengths are fixed at construction. Angles are the chain's persistent
/// state and are rewritten by the solver every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    root: Point2<f32>,
    target: Point2<f32>,
    lengths: Vec<f32>,
    angles: Vec<f32>,
}

impl Chain {
    /// Build a chain anchored at `root`.
    ///
    /// The target starts at the chain's current end effector.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainError`] if there are no segments or more than
    /// [`MAX_SEGMENTS`](reach_core::config::MAX_SEGMENTS), if the length and
    /// angle counts differ, if any length is not strictly positive, or if the
    /// root or an angle is not finite.
    pub fn new(root: Point2<f32>, lengths: Vec<f32>, angles: Vec<f32>) -> Result<Self, ChainError> {
        validate_arm([root.x, root.y], &lengths, &angles)?;

        let mut chain = Self {
            root,
            target: root,
            lengths,
            angles,
        };
        chain.target = chain.end_effector();

        info!(
            segments = chain.segment_count(),
            reach = chain.total_length(),
            "Built arm chain"
        );
        Ok(chain)
    }

    /// Build a chain from an [`ArmConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`Chain::new`].
    pub fn from_config(config: &ArmConfig) -> Result<Self, ChainError> {
        Self::new(
            Point2::new(config.root[0], config.root[1]),
            config.segment_lengths.clone(),
            config.initial_angles.clone(),
        )
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    /// Fixed anchor of segment 0.
    pub const fn root(&self) -> Point2<f32> {
        self.root
    }

    /// Point the end effector is being driven toward.
    pub const fn target(&self) -> Point2<f32> {
        self.target
    }

    pub fn set_target(&mut self, target: Point2<f32>) {
        self.target = target;
    }

    /// Segment lengths, root to end effector.
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Relative segment angles in radians.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub(crate) fn angles_mut(&mut self) -> &mut [f32] {
        &mut self.angles
    }

    /// Sum of all segment lengths: the radius of the reachable disk.
    pub fn total_length(&self) -> f32 {
        self.lengths.iter().sum()
    }

    /// Joint positions in world space. See [`compute_joints`].
    pub fn joints(&self) -> Vec<Point2<f32>> {
        compute_joints(self)
    }

    /// Position of the last joint, without building the full sequence.
    pub fn end_effector(&self) -> Point2<f32> {
        let mut cumulative = 0.0_f32;
        let mut position = self.root;
        for (&length, &angle) in self.lengths.iter().zip(&self.angles) {
            cumulative += angle;
            position += segment_vector(length, cumulative);
        }
        position
    }
}

/// Forward kinematics: `segment_count() + 1` joint positions, starting at
/// the root and ending at the end effector.
///
/// Each segment points along the running sum of all angles up to and
/// including its own. Every consecutive pair of joints is exactly
/// `lengths[i]` apart.
pub fn compute_joints(chain: &Chain) -> Vec<Point2<f32>> {
    let mut joints = Vec::with_capacity(chain.lengths.len() + 1);
    joints.push(chain.root);

    let mut cumulative = 0.0_f32;
    for (&length, &angle) in chain.lengths.iter().zip(&chain.angles) {
        cumulative += angle;
        let previous = joints[joints.len() - 1];
        joints.push(previous + segment_vector(length, cumulative));
    }
    joints
}

/// Inverse of the cumulative walk in [`compute_joints`]: recover the
/// relative angle of each segment from absolute joint positions.
///
/// Absolute segment angles are measured from +X in `(-pi, pi]`, so the
/// result matches the input angles modulo `2*pi` per segment.
pub fn extract_angles(joints: &[Point2<f32>]) -> Vec<f32> {
    let mut angle_total = 0.0_f32;
    joints
        .windows(2)
        .map(|pair| {
            let segment = pair[1] - pair[0];
            let angle = segment.y.atan2(segment.x) - angle_total;
            angle_total += angle;
            angle
        })
        .collect()
}

fn segment_vector(length: f32, angle: f32) -> Vector2<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(cos, sin) * length
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    fn demo_chain() -> Chain {
        Chain::from_config(&ArmConfig::default()).unwrap()
    }

    #[test]
    fn chain_from_default_config() {
        let chain = demo_chain();
        assert_eq!(chain.segment_count(), 4);
        assert_eq!(chain.root(), Point2::new(1.0, -1.0));
        assert_relative_eq!(chain.total_length(), 4.1, epsilon = 1e-5);
    }

    #[test]
    fn new_chain_targets_its_end_effector() {
        let chain = demo_chain();
        assert_eq!(chain.target(), chain.end_effector());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = Chain::new(Point2::origin(), vec![1.0, 0.0], vec![0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ChainError::NonPositiveLength { index: 1, .. }));

        let err = Chain::new(Point2::origin(), vec![], vec![]).unwrap_err();
        assert_eq!(err, ChainError::NoSegments);
    }

    #[test]
    fn joint_count_is_segments_plus_one() {
        let chain = demo_chain();
        assert_eq!(chain.joints().len(), chain.lengths().len() + 1);
    }

    #[test]
    fn fk_straight_chain_along_x() {
        let chain = Chain::new(Point2::new(0.5, 0.5), vec![1.0, 2.0, 0.5], vec![0.0; 3]).unwrap();
        let joints = compute_joints(&chain);
        assert_relative_eq!(joints[3].x, 4.0, epsilon = 1e-6);
        assert_relative_eq!(joints[3].y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn fk_angles_are_relative() {
        // Two quarter turns: first segment points +Y, second points -X.
        let chain =
            Chain::new(Point2::origin(), vec![1.0, 1.0], vec![FRAC_PI_2, FRAC_PI_2]).unwrap();
        let joints = compute_joints(&chain);
        assert_relative_eq!(joints[1].x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(joints[1].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(joints[2].x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(joints[2].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn fk_demo_arm_positions() {
        // Each segment adds another -45 degrees.
        let chain = demo_chain();
        let joints = compute_joints(&chain);
        assert_eq!(joints[0], Point2::new(1.0, -1.0));
        let c = FRAC_PI_4.cos();
        assert_relative_eq!(joints[1].x, 1.0 + 0.9 * c, epsilon = 1e-5);
        assert_relative_eq!(joints[1].y, -1.0 - 0.9 * c, epsilon = 1e-5);
        // second segment points straight down
        assert_relative_eq!(joints[2].x, joints[1].x, epsilon = 1e-5);
        assert_relative_eq!(joints[2].y, joints[1].y - 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fk_preserves_lengths_for_large_angles() {
        let chain = Chain::new(
            Point2::new(-3.0, 2.0),
            vec![0.9, 1.0, 1.5, 0.7],
            vec![12.0, -7.5, 100.0, -0.001],
        )
        .unwrap();
        let joints = compute_joints(&chain);
        for (pair, &length) in joints.windows(2).zip(chain.lengths()) {
            assert_relative_eq!((pair[1] - pair[0]).norm(), length, epsilon = 1e-5);
        }
    }

    #[test]
    fn end_effector_matches_last_joint() {
        let chain = Chain::new(
            Point2::new(0.2, -0.4),
            vec![0.3, 1.1, 0.8],
            vec![0.4, -1.2, 2.5],
        )
        .unwrap();
        let joints = chain.joints();
        let ee = chain.end_effector();
        assert_relative_eq!(ee.x, joints[3].x, epsilon = 1e-6);
        assert_relative_eq!(ee.y, joints[3].y, epsilon = 1e-6);
    }

    #[test]
    fn extract_angles_inverts_fk() {
        let angles = vec![0.3, -0.8, 1.1, 0.25];
        let chain = Chain::new(Point2::new(1.0, -1.0), vec![0.9, 1.0, 1.5, 0.7], angles.clone())
            .unwrap();
        let recovered = extract_angles(&compute_joints(&chain));
        assert_eq!(recovered.len(), angles.len());
        for (got, want) in recovered.iter().zip(&angles) {
            assert_relative_eq!(*got, *want, epsilon = 1e-5);
        }
    }

    #[test]
    fn extract_angles_demo_arm() {
        // The last segment points along -X, right on the atan2 branch cut,
        // so compare modulo a full turn.
        let chain = demo_chain();
        let recovered = extract_angles(&compute_joints(&chain));
        for got in recovered {
            let diff = (got + FRAC_PI_4).rem_euclid(TAU);
            assert!(diff.min(TAU - diff) < 1e-5, "got {got}");
        }
    }

    #[test]
    fn extract_angles_wraps_modulo_full_turn() {
        // Cumulative angle leaves (-pi, pi]; the recovered sum stays inside it.
        let chain = Chain::new(Point2::origin(), vec![1.0, 1.0], vec![3.0, 1.0]).unwrap();
        let recovered = extract_angles(&compute_joints(&chain));
        assert_relative_eq!(recovered[0], 3.0, epsilon = 1e-5);
        assert_relative_eq!(recovered[1], 1.0 - 2.0 * PI, epsilon = 1e-5);

        let rebuilt = Chain::new(Point2::origin(), vec![1.0, 1.0], recovered).unwrap();
        let a = compute_joints(&chain);
        let b = compute_joints(&rebuilt);
        for (p, q) in a.iter().zip(&b) {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-5);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn extract_angles_of_single_joint_is_empty() {
        assert!(extract_angles(&[Point2::new(1.0, 1.0)]).is_empty());
    }
}
