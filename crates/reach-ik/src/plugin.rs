//! Bevy ECS integration for the FABRIK solver.
//!
//! Provides [`ReachIkPlugin`] which solves the [`ArmChain`] resource toward
//! its target once per frame.
//!
//! # Usage
//!
//! 1. Add [`ReachCorePlugin`](reach_core::ReachCorePlugin) and
//!    [`ReachIkPlugin`] to your app.
//! 2. Insert an [`ArmChain`] built from an
//!    [`ArmConfig`](reach_core::config::ArmConfig).
//! 3. Write targets with [`ArmChain::set_target`] from a system in
//!    [`ReachSet::Input`].
//!
//! The solve system runs in [`ReachSet::Solve`]; anything in
//! [`ReachSet::Draw`] sees the solved angles for the same frame.

use bevy::prelude::*;
use nalgebra::Point2;

use reach_core::ReachSet;
use reach_core::config::{ArmConfig, SolverConfig};
use reach_core::error::ChainError;

use crate::chain::Chain;
use crate::solver::{FabrikSolver, SolveReport};

/// Bevy plugin that adds the per-frame FABRIK solve.
///
/// Expects [`ReachCorePlugin`](reach_core::ReachCorePlugin) to be added for
/// set ordering and the default [`SolverConfig`].
pub struct ReachIkPlugin;

impl Plugin for ReachIkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LastSolve>()
            .add_systems(Update, fabrik_solve_system.in_set(ReachSet::Solve));
    }
}

/// The arm being driven. One chain per app.
#[derive(Resource, Debug, Clone)]
pub struct ArmChain(pub Chain);

impl ArmChain {
    /// Build from config.
    ///
    /// # Errors
    ///
    /// Returns the [`ChainError`] raised by [`Chain::from_config`].
    pub fn from_config(config: &ArmConfig) -> Result<Self, ChainError> {
        Chain::from_config(config).map(Self)
    }

    pub fn set_target(&mut self, target: Point2<f32>) {
        self.0.set_target(target);
    }

    pub const fn chain(&self) -> &Chain {
        &self.0
    }
}

/// Report of the most recent frame's solve. `None` until the first solve.
#[derive(Resource, Debug, Clone, Default)]
pub struct LastSolve(pub Option<SolveReport>);

/// Solve the [`ArmChain`] toward its target under the current
/// [`SolverConfig`], recording the outcome in [`LastSolve`].
///
/// Does nothing if no [`ArmChain`] has been inserted.
#[allow(clippy::needless_pass_by_value)]
pub fn fabrik_solve_system(
    arm: Option<ResMut<ArmChain>>,
    config: Res<SolverConfig>,
    mut last: ResMut<LastSolve>,
) {
    let Some(mut arm) = arm else {
        return;
    };

    let solver = FabrikSolver::new(config.clone());
    last.0 = Some(solver.solve(&mut arm.0));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
