//! Reference chains used across the test suites.

use nalgebra::Point2;

use reach_core::config::ArmConfig;
use reach_ik::Chain;

/// The demo arm: root (1, -1), lengths [0.9, 1.0, 1.5, 0.7], every joint
/// bent -45 degrees.
pub fn demo_arm() -> Chain {
    Chain::from_config(&ArmConfig::default()).expect("default arm is valid")
}

/// `segments` unit-length segments rooted at the origin with a gentle
/// alternating bend.
pub fn equal_arm(segments: usize) -> Chain {
    let angles = (0..segments)
        .map(|i| if i % 2 == 0 { 0.3 } else { -0.2 })
        .collect();
    Chain::new(Point2::origin(), vec![1.0; segments], angles).expect("equal arm is valid")
}

/// Four segments of very different lengths rooted at the origin.
pub fn unequal_arm() -> Chain {
    Chain::new(
        Point2::origin(),
        vec![0.9, 1.0, 1.5, 0.7],
        vec![0.3, 0.2, -0.1, 0.4],
    )
    .expect("unequal arm is valid")
}

/// A single segment of `length` rooted at the origin, pointing at 0.5 rad.
pub fn single_segment(length: f32) -> Chain {
    Chain::new(Point2::origin(), vec![length], vec![0.5]).expect("single segment is valid")
}
