use thiserror::Error;

/// Top-level error type for reach-core.
#[derive(Debug, Error)]
pub enum ReachError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid arm: {0}")]
    Chain(#[from] ChainError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Rejections raised while building a chain.
///
/// Copy + static messages so construction can be retried cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChainError {
    #[error("Chain has no segments")]
    NoSegments,

    #[error("Chain has {count} segments (max {max})")]
    TooManySegments { count: usize, max: usize },

    #[error("Segment/angle count mismatch: {lengths} lengths, {angles} angles")]
    CountMismatch { lengths: usize, angles: usize },

    #[error("Segment {index} has non-positive length {length}")]
    NonPositiveLength { index: usize, length: f32 },

    #[error("Segment {index} has non-finite angle")]
    NonFiniteAngle { index: usize },

    #[error("Root position is not finite")]
    NonFiniteRoot,
}
