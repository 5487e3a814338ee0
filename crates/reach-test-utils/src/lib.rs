//! Shared test fixtures and utilities for Reach crates.
//!
//! Provides reference chains, headless Bevy test apps, and angle/point
//! comparison helpers that account for the atan2 branch cut.

pub mod app;
pub mod chains;
pub mod geometry;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{arm_test_app, minimal_test_app};
pub use chains::{demo_arm, equal_arm, single_segment, unequal_arm};
pub use geometry::{angle_distance, max_angle_change, point_distance};
