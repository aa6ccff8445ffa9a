//! # Error Types
//!
//! The voxel core never fails: out-of-world reads return air and out-of-world writes
//! are dropped. Errors only arise while loading and checking configuration.

use thiserror::Error;

/// Errors that can occur while loading a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an unusable world.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
