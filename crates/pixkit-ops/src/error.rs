//! Error types for pixel operations.

use crate::pipeline::StageId;
use thiserror::Error;

/// Error type for pixel operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Malformed buffer or color from `pixkit-core`.
    #[error(transparent)]
    Core(#[from] pixkit_core::Error),

    /// Flood fill seed lies outside the buffer.
    #[error("seed ({x}, {y}) is outside the {width}x{height} buffer")]
    SeedOutOfBounds {
        /// Seed X coordinate
        x: i32,
        /// Seed Y coordinate
        y: i32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// No pipeline stage with this id.
    #[error("unknown pipeline stage: {0}")]
    UnknownStage(StageId),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pipeline description is malformed.
    #[error("invalid pipeline config: {0}")]
    Config(String),

    /// I/O error reading a pipeline description.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
