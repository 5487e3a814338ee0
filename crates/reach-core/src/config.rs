use std::f32::consts::FRAC_PI_4;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ConfigError};

/// Upper bound on the number of segments in a chain.
pub const MAX_SEGMENTS: usize = 16;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_root() -> [f32; 2] {
    [1.0, -1.0]
}
fn default_segment_lengths() -> Vec<f32> {
    vec![0.9, 1.0, 1.5, 0.7]
}
fn default_initial_angles() -> Vec<f32> {
    vec![-FRAC_PI_4; 4]
}
const fn default_max_iterations() -> u32 {
    20
}
const fn default_tolerance() -> f32 {
    0.01
}
const fn default_window_size() -> [u32; 2] {
    [1024, 1024]
}
fn default_title() -> String {
    "FABRIK Demo".into()
}
const fn default_zoom() -> f32 {
    100.0
}
const fn default_line_width() -> f32 {
    3.0
}
const fn default_joint_radius() -> f32 {
    0.1
}
const fn default_background() -> [u8; 3] {
    [20, 20, 20]
}

// ---------------------------------------------------------------------------
// ArmConfig
// ---------------------------------------------------------------------------

/// Static description of a planar arm: where it is anchored, how long each
/// segment is, and the relative angle each segment starts at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Fixed anchor of segment 0, in world units.
    #[serde(default = "default_root")]
    pub root: [f32; 2],

    /// Segment lengths from root to end effector. All must be > 0.
    #[serde(default = "default_segment_lengths")]
    pub segment_lengths: Vec<f32>,

    /// Relative segment angles in radians. Same length as `segment_lengths`.
    #[serde(default = "default_initial_angles")]
    pub initial_angles: Vec<f32>,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            segment_lengths: default_segment_lengths(),
            initial_angles: default_initial_angles(),
        }
    }
}

impl ArmConfig {
    /// Straight arm along +X with the given segment lengths.
    pub fn straight(root: [f32; 2], segment_lengths: Vec<f32>) -> Self {
        let initial_angles = vec![0.0; segment_lengths.len()];
        Self {
            root,
            segment_lengths,
            initial_angles,
        }
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        validate_arm(self.root, &self.segment_lengths, &self.initial_angles)
    }

    /// Sum of all segment lengths.
    pub fn reach(&self) -> f32 {
        self.segment_lengths.iter().sum()
    }
}

/// Check the chain construction rules shared by config loading and
/// direct chain construction.
pub fn validate_arm(root: [f32; 2], lengths: &[f32], angles: &[f32]) -> Result<(), ChainError> {
    if lengths.is_empty() {
        return Err(ChainError::NoSegments);
    }
    if lengths.len() > MAX_SEGMENTS {
        return Err(ChainError::TooManySegments {
            count: lengths.len(),
            max: MAX_SEGMENTS,
        });
    }
    if lengths.len() != angles.len() {
        return Err(ChainError::CountMismatch {
            lengths: lengths.len(),
            angles: angles.len(),
        });
    }
    if !root.iter().all(|c| c.is_finite()) {
        return Err(ChainError::NonFiniteRoot);
    }
    for (index, &length) in lengths.iter().enumerate() {
        if !length.is_finite() || length <= 0.0 {
            return Err(ChainError::NonPositiveLength { index, length });
        }
    }
    if let Some(index) = angles.iter().position(|a| !a.is_finite()) {
        return Err(ChainError::NonFiniteAngle { index });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Iteration policy for the per-frame solve loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct SolverConfig {
    /// Maximum solver steps per frame (default: 20).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Residual below which the loop stops early, in world units (default: 0.01).
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(invalid("solver.max_iterations", "must be >= 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(invalid(
                "solver.tolerance",
                format!("{} (must be finite and > 0)", self.tolerance),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ViewConfig
// ---------------------------------------------------------------------------

/// Window and drawing parameters for the interactive view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct ViewConfig {
    /// Window size [width, height] in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_size: [u32; 2],

    #[serde(default = "default_title")]
    pub title: String,

    /// Pixels per world unit.
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Segment line width in pixels.
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Joint marker radius in world units.
    #[serde(default = "default_joint_radius")]
    pub joint_radius: f32,

    /// Clear colour as 8-bit sRGB.
    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            title: default_title(),
            zoom: default_zoom(),
            line_width: default_line_width(),
            joint_radius: default_joint_radius(),
            background: default_background(),
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size.contains(&0) {
            return Err(invalid("view.window_size", "dimensions must be > 0"));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(invalid("view.zoom", "must be finite and > 0"));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(invalid("view.line_width", "must be finite and > 0"));
        }
        if !self.joint_radius.is_finite() || self.joint_radius < 0.0 {
            return Err(invalid("view.joint_radius", "must be finite and >= 0"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReachConfig
// ---------------------------------------------------------------------------

/// Complete application configuration, one TOML table per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReachConfig {
    #[serde(default)]
    pub arm: ArmConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl ReachConfig {
    /// Validate every section, returning the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arm.validate()?;
        self.solver.validate()?;
        self.view.validate()
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
