//! FABRIK (Forward And Backward Reaching Inverse Kinematics) solver.
//!
//! One [`solve_step`] pins the end effector on the target and walks the
//! length constraints back to the root, then re-pins the root and walks them
//! forward again. The resulting positions are converted back into relative
//! angles with [`extract_angles`] so the [`Chain`] stays in angle form.
//! [`FabrikSolver::solve`] repeats the step under a [`SolverConfig`].

use nalgebra::{Point2, Unit, Vector2};
use tracing::{debug, trace, warn};

use reach_core::config::SolverConfig;

use crate::chain::{Chain, compute_joints, extract_angles};

/// Vectors shorter than this are treated as having no direction.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Result of a bounded solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Number of steps taken.
    pub iterations: u32,
    /// Residual returned by the last step. Zero when the target was out of
    /// reach, since the straightened pose is final.
    pub residual: f32,
    /// Whether the loop stopped on the tolerance test.
    pub converged: bool,
    /// Whether the last step found the target inside the reachable disk.
    pub reachable: bool,
    /// Actual distance from the end effector to the target after solving.
    pub end_effector_gap: f32,
    /// Zero-length directions that had to be replaced during the solve.
    pub degenerate_directions: u32,
}

/// What a single step did, beyond the residual it reports.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StepOutcome {
    residual: f32,
    reachable: bool,
    fallbacks: u32,
}

/// Iterative FABRIK solver.
///
/// The solver holds only its iteration policy; all state lives in the
/// [`Chain`]'s angles.
#[derive(Debug, Clone, Default)]
pub struct FabrikSolver {
    config: SolverConfig,
}

impl FabrikSolver {
    /// Create a new solver with the given configuration.
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration (20 steps, 0.01 tolerance).
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run a single step. See [`solve_step`].
    pub fn step(&self, chain: &mut Chain) -> f32 {
        solve_step(chain)
    }

    /// Step until the residual drops below the tolerance or the iteration
    /// cap is hit.
    pub fn solve(&self, chain: &mut Chain) -> SolveReport {
        let mut report = SolveReport {
            iterations: 0,
            residual: distance(chain.end_effector(), chain.target()),
            converged: false,
            reachable: true,
            end_effector_gap: 0.0,
            degenerate_directions: 0,
        };

        for iteration in 0..self.config.max_iterations {
            let outcome = step_with_outcome(chain);
            report.iterations = iteration + 1;
            report.residual = outcome.residual;
            report.reachable = outcome.reachable;
            report.degenerate_directions += outcome.fallbacks;

            if outcome.residual < self.config.tolerance {
                report.converged = true;
                break;
            }
        }

        report.end_effector_gap = distance(chain.end_effector(), chain.target());
        debug!(
            iterations = report.iterations,
            residual = report.residual,
            gap = report.end_effector_gap,
            converged = report.converged,
            reachable = report.reachable,
            "FABRIK solve"
        );
        report
    }
}

/// Advance the chain's angles one FABRIK iteration toward its target and
/// return the remaining distance between end effector and target.
///
/// If the target lies at or beyond the chain's total length, the chain is
/// straightened toward it and `0.0` is returned: nothing further can be
/// gained by iterating. A non-finite target leaves the chain untouched and
/// also returns `0.0`.
pub fn solve_step(chain: &mut Chain) -> f32 {
    step_with_outcome(chain).residual
}

fn step_with_outcome(chain: &mut Chain) -> StepOutcome {
    let target = chain.target();
    if !(target.x.is_finite() && target.y.is_finite()) {
        warn!(x = target.x, y = target.y, "Ignoring non-finite target");
        return StepOutcome {
            residual: 0.0,
            reachable: false,
            fallbacks: 0,
        };
    }

    let to_target = target - chain.root();
    if to_target.norm() >= chain.total_length() {
        straighten_toward(chain, to_target);
        return StepOutcome {
            residual: 0.0,
            reachable: false,
            fallbacks: 0,
        };
    }

    let mut fallbacks = 0;
    let current = compute_joints(chain);
    let backward = backward_pass(&current, chain.lengths(), target, &mut fallbacks);
    let forward = forward_pass(&backward, chain.lengths(), chain.root(), &mut fallbacks);

    let angles = extract_angles(&forward);
    chain.angles_mut().copy_from_slice(&angles);

    StepOutcome {
        residual: distance(forward[forward.len() - 1], target),
        reachable: true,
        fallbacks,
    }
}

/// Point the first segment at the target and zero every relative angle
/// after it, giving a single straight ray from the root.
fn straighten_toward(chain: &mut Chain, to_target: Vector2<f32>) {
    let angles = chain.angles_mut();
    angles.fill(0.0);
    angles[0] = to_target.y.atan2(to_target.x);
}

/// Pin the last joint on the target and pull each earlier joint toward its
/// previous position, keeping segment lengths.
fn backward_pass(
    joints: &[Point2<f32>],
    lengths: &[f32],
    target: Point2<f32>,
    fallbacks: &mut u32,
) -> Vec<Point2<f32>> {
    let mut out = joints.to_vec();
    let last = out.len() - 1;
    out[last] = target;

    for i in (0..last).rev() {
        let previous = joints[i] - joints[i + 1];
        let direction = unit_or(joints[i] - out[i + 1], previous, fallbacks);
        out[i] = out[i + 1] + direction * lengths[i];
    }
    out
}

/// Re-pin the first joint on the root and push each later joint toward its
/// backward-pass position, keeping segment lengths.
fn forward_pass(
    backward: &[Point2<f32>],
    lengths: &[f32],
    root: Point2<f32>,
    fallbacks: &mut u32,
) -> Vec<Point2<f32>> {
    let mut out = backward.to_vec();
    out[0] = root;

    for i in 1..out.len() {
        let previous = backward[i] - backward[i - 1];
        let direction = unit_or(backward[i] - out[i - 1], previous, fallbacks);
        out[i] = out[i - 1] + direction * lengths[i - 1];
    }
    out
}

/// Normalize `v`, substituting `fallback` (then +X) when `v` has no length.
fn unit_or(v: Vector2<f32>, fallback: Vector2<f32>, fallbacks: &mut u32) -> Vector2<f32> {
    if let Some(direction) = Unit::try_new(v, DEGENERATE_EPSILON) {
        return direction.into_inner();
    }
    *fallbacks += 1;
    trace!(
        fallback_x = fallback.x,
        fallback_y = fallback.y,
        "Zero-length direction, using previous segment direction"
    );
    Unit::try_new(fallback, DEGENERATE_EPSILON).map_or_else(Vector2::x, Unit::into_inner)
}

fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (b - a).norm()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
