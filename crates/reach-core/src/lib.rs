// reach-core: Config, errors and frame ordering for the Reach planar arm.

pub mod config;
pub mod error;

use bevy::prelude::*;

use crate::config::SolverConfig;

/// Per-frame ordering of the arm pipeline.
///
/// The sets run chained in [`Update`]: the target is written, then the
/// chain is solved, then the result is drawn. Readers in `Draw` therefore
/// always see the angles of the current frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReachSet {
    /// Sample input and write the chain target.
    Input,
    /// Run the bounded solve loop.
    Solve,
    /// Read joint positions for rendering.
    Draw,
}

/// Configures [`ReachSet`] ordering and inserts a default [`SolverConfig`]
/// if the app has not provided one.
pub struct ReachCorePlugin;

impl Plugin for ReachCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SolverConfig>().configure_sets(
            Update,
            (ReachSet::Input, ReachSet::Solve, ReachSet::Draw).chain(),
        );
    }
}

pub mod prelude {
    pub use crate::config::{ArmConfig, MAX_SEGMENTS, ReachConfig, SolverConfig, ViewConfig};
    pub use crate::error::{ChainError, ConfigError, ReachError};
    pub use crate::{ReachCorePlugin, ReachSet};
}
