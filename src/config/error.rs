//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Top-K must be at least 1.
    #[error("invalid top_k '{value}': must be greater than zero")]
    InvalidTopK { value: String },

    /// Skill match threshold outside `[0, 1]`.
    #[error("skill match threshold {value} must be between 0.0 and 1.0")]
    ThresholdOutOfRange { value: f32 },

    /// Blend weights outside `[0, 1]` or not summing to 1.
    #[error("invalid match weights: {reason}")]
    InvalidWeights { reason: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
