//! Headless Bevy test app builders.

use bevy::prelude::*;

use reach_core::ReachCorePlugin;
use reach_core::config::ArmConfig;
use reach_ik::{ArmChain, ReachIkPlugin};

/// Create a test app with the core and IK plugins but no arm.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(ReachCorePlugin);
    app.add_plugins(ReachIkPlugin);
    app.finish();
    app.cleanup();
    app
}

/// Create a test app with an [`ArmChain`] built from `config`.
///
/// # Panics
///
/// Panics if `config` does not describe a valid chain.
pub fn arm_test_app(config: &ArmConfig) -> App {
    let mut app = minimal_test_app();
    let arm = ArmChain::from_config(config).expect("test arm config must be valid");
    app.insert_resource(arm);
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
