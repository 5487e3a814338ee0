//! FABRIK inverse kinematics for planar articulated chains.
//!
//! Provides forward kinematics, the FABRIK backward/forward reaching step,
//! and a bounded per-frame solve loop for a single open chain anchored at a
//! fixed root.
//!
//! # Architecture
//!
//! ```text
//! ArmConfig ──► Chain ──► solve_step (xN) ──► angles ──► compute_joints
//! ```
//!
//! The [`Chain`] keeps relative segment angles as its only mutable state.
//! Each [`solve_step`] derives joint positions with [`compute_joints`],
//! moves them toward the target, and writes angles back with
//! [`extract_angles`].

pub mod chain;
pub mod plugin;
pub mod solver;

pub use chain::{Chain, compute_joints, extract_angles};
pub use plugin::{ArmChain, LastSolve, ReachIkPlugin};
pub use solver::{FabrikSolver, SolveReport, solve_step};
