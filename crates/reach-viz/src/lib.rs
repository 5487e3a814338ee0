//! Interactive view for the Reach planar arm.
//!
//! `reach-viz` turns a Bevy app into the arm demo:
//! - 2D camera centred on the world origin, scaled by [`ViewConfig::zoom`]
//! - cursor position mapped into world space and written as the arm target
//! - segments and joints drawn with gizmos every frame
//! - FPS readout in the top-left corner
//!
//! # Usage
//!
//! ```no_run
//! use bevy::prelude::*;
//! use reach_core::{ReachCorePlugin, config::{ArmConfig, ViewConfig}};
//! use reach_ik::{ArmChain, ReachIkPlugin};
//! use reach_viz::{ReachVizPlugin, window_plugin};
//!
//! let view = ViewConfig::default();
//! App::new()
//!     .add_plugins(DefaultPlugins.set(window_plugin(&view)))
//!     .add_plugins((ReachCorePlugin, ReachIkPlugin, ReachVizPlugin))
//!     .insert_resource(view)
//!     .insert_resource(ArmChain::from_config(&ArmConfig::default()).unwrap())
//!     .run();
//! ```
//!
//! [`ViewConfig::zoom`]: reach_core::config::ViewConfig::zoom

pub mod camera;
pub mod draw;
pub mod input;
pub mod overlay;
pub mod plugin;

pub use camera::{ArmCamera, point_to_vec2, vec2_to_point};
pub use draw::ArmPalette;
pub use plugin::{ReachVizPlugin, window_plugin};
