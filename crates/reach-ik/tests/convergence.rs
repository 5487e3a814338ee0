//! Integration test: bounded FABRIK solves on reference chains.
//!
//! Checks that reachable targets are hit within the default 20 steps at a
//! 0.01 tolerance, that out-of-reach targets straighten the chain along the
//! root-to-target ray, and that a converged chain stays put when stepped
//! further.

use nalgebra::Point2;
use reach_core::config::SolverConfig;
use reach_ik::{FabrikSolver, compute_joints, solve_step};
use reach_test_utils::{
    demo_arm, equal_arm, max_angle_change, point_distance, single_segment, unequal_arm,
};

const TOLERANCE: f32 = 0.01;

fn assert_converges(mut chain: reach_ik::Chain, target: Point2<f32>) -> reach_ik::Chain {
    chain.set_target(target);
    let report = FabrikSolver::with_defaults().solve(&mut chain);

    assert!(
        report.converged,
        "target {target:?}: residual={} after {} iterations",
        report.residual, report.iterations
    );
    assert!(report.reachable);
    assert!(report.iterations <= 20);
    let gap = point_distance(chain.end_effector(), target);
    assert!(gap < TOLERANCE, "target {target:?}: gap={gap}");
    chain
}

// ---------------------------------------------------------------------------
// Convergence
// ---------------------------------------------------------------------------

#[test]
fn demo_arm_reaches_worked_example() {
    // root (1,-1), lengths [0.9, 1.0, 1.5, 0.7], target (3,-1)
    let chain = assert_converges(demo_arm(), Point2::new(3.0, -1.0));
    assert_eq!(chain.joints()[0], Point2::new(1.0, -1.0));
}

#[test]
fn single_segment_reaches_target_near_its_circle() {
    // A single segment can only touch its circle, so place the target just
    // inside it, within tolerance.
    let angle = 2.0_f32;
    let radius = 2.0 * 0.9975;
    let target = Point2::new(radius * angle.cos(), radius * angle.sin());

    let chain = assert_converges(single_segment(2.0), target);
    assert!((chain.angles()[0] - angle).abs() < 1e-3);
}

#[test]
fn equal_four_segment_arm_converges() {
    for target in [
        Point2::new(2.5, 1.0),
        Point2::new(1.5, 2.0),
        Point2::new(-1.0, 1.5),
        Point2::new(0.5, -2.0),
        Point2::new(2.0, 0.0),
    ] {
        assert_converges(equal_arm(4), target);
    }
}

#[test]
fn unequal_four_segment_arm_converges() {
    for target in [
        Point2::new(3.0, 0.0),
        Point2::new(1.0, 0.3),
        Point2::new(0.5, 0.2),
        Point2::new(-1.0, 2.0),
        Point2::new(0.0, -3.0),
        Point2::new(2.0, 2.0),
    ] {
        assert_converges(unequal_arm(), target);
    }
}

#[test]
fn longer_equal_arms_converge() {
    for segments in [3_u8, 5, 6] {
        let n = f32::from(segments);
        assert_converges(
            equal_arm(usize::from(segments)),
            Point2::new(n * 0.5, n * 0.3),
        );
    }
}

#[test]
fn tracks_a_moving_target_frame_to_frame() {
    let mut chain = demo_arm();
    let solver = FabrikSolver::with_defaults();
    let root = chain.root();
    let radius = 0.6 * chain.total_length();

    for frame in 0..120_u8 {
        let theta = f32::from(frame) / 120.0 * std::f32::consts::TAU;
        let target = root + nalgebra::Vector2::new(theta.cos(), theta.sin()) * radius;
        chain.set_target(target);
        let report = solver.solve(&mut chain);
        assert!(report.converged, "frame {frame}: residual={}", report.residual);
    }
}

// ---------------------------------------------------------------------------
// Unreachable targets
// ---------------------------------------------------------------------------

#[test]
fn unreachable_target_gives_collinear_chain_on_ray() {
    let mut chain = demo_arm();
    let target = Point2::new(-6.0, 4.0);
    chain.set_target(target);

    let residual = solve_step(&mut chain);
    assert!(residual.abs() < f32::EPSILON);
    assert!(chain.angles()[1..].iter().all(|&a| a == 0.0));

    let root = chain.root();
    let ray = (target - root).normalize();
    for joint in compute_joints(&chain) {
        let offset = joint - root;
        // perpendicular distance from the ray
        let cross = offset.x * ray.y - offset.y * ray.x;
        assert!(cross.abs() < 1e-4, "joint {joint:?} off the ray");
        assert!(offset.dot(&ray) >= -1e-6);
    }
    let ee = chain.end_effector();
    assert!((point_distance(root, ee) - chain.total_length()).abs() < 1e-4);
}

#[test]
fn unreachable_solve_stops_after_one_step() {
    let mut chain = unequal_arm();
    chain.set_target(Point2::new(50.0, 0.0));
    let report = FabrikSolver::with_defaults().solve(&mut chain);
    assert_eq!(report.iterations, 1);
    assert!(report.converged);
    assert!(!report.reachable);
    assert!((report.end_effector_gap - (50.0 - 4.1)).abs() < 1e-3);
}

// ---------------------------------------------------------------------------
// Stability
// ---------------------------------------------------------------------------

#[test]
fn root_never_moves() {
    let mut chain = unequal_arm();
    let root = chain.root();
    for target in [
        Point2::new(1.0, 0.3),
        Point2::new(-2.0, -1.0),
        Point2::new(9.0, 9.0),
        Point2::new(0.0, 0.0),
    ] {
        chain.set_target(target);
        for _ in 0..25 {
            solve_step(&mut chain);
            assert_eq!(compute_joints(&chain)[0], root);
        }
    }
}

#[test]
fn converged_chain_does_not_drift() {
    for (chain, target) in [
        (demo_arm(), Point2::new(3.0, -1.0)),
        (equal_arm(4), Point2::new(2.5, 1.0)),
        (unequal_arm(), Point2::new(1.0, 0.3)),
    ] {
        let mut chain = assert_converges(chain, target);
        let mut previous = chain.angles().to_vec();
        for _ in 0..20 {
            let residual = solve_step(&mut chain);
            assert!(residual < TOLERANCE);
            let change = max_angle_change(&previous, chain.angles());
            assert!(change < 0.05, "angles moved by {change} after convergence");
            previous = chain.angles().to_vec();
        }
    }
}

#[test]
fn tighter_tolerance_needs_more_iterations() {
    let target = Point2::new(2.5, 1.0);

    let mut loose = equal_arm(4);
    loose.set_target(target);
    let loose_report = FabrikSolver::with_defaults().solve(&mut loose);

    let mut tight = equal_arm(4);
    tight.set_target(target);
    let tight_report = FabrikSolver::new(SolverConfig {
        max_iterations: 200,
        tolerance: 1e-4,
    })
    .solve(&mut tight);

    assert!(tight_report.converged);
    assert!(tight_report.iterations >= loose_report.iterations);
    assert!(tight_report.residual < loose_report.residual);
}
