use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ToxicityError {
    #[error("toxicity model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load toxicity model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("toxicity inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid toxicity configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("toxicity classifier unavailable: {reason}")]
    Unavailable { reason: String },
}

impl ToxicityError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ToxicityError::Unavailable { .. })
    }
}

impl From<candle_core::Error> for ToxicityError {
    fn from(err: candle_core::Error) -> Self {
        ToxicityError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ToxicityError {
    fn from(err: std::io::Error) -> Self {
        ToxicityError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for ToxicityError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::DeviceUnavailable { device, reason } => {
                ToxicityError::DeviceUnavailable { device, reason }
            }
            _ => ToxicityError::InferenceFailed {
                reason: err.to_string(),
            },
        }
    }
}
