use std::path::PathBuf;

use super::error::ToxicityError;
use crate::constants::DEFAULT_CLASSIFIER_MAX_SEQ_LEN;
use crate::embedding::utils::missing_model_file;

#[derive(Debug, Clone)]
/// Configuration for [`ToxicityClassifier`](super::ToxicityClassifier).
///
/// With no `model_dir` the classifier is unavailable and moderation uses the
/// rule-based fallback.
pub struct ToxicityConfig {
    pub model_dir: Option<PathBuf>,
    pub max_seq_len: usize,
    pub prefer_gpu: bool,
}

impl Default for ToxicityConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_CLASSIFIER_MAX_SEQ_LEN,
            prefer_gpu: cfg!(any(feature = "metal", feature = "cuda")),
        }
    }
}

impl ToxicityConfig {
    pub const ENV_MODEL_PATH: &'static str = "SKILLSWAP_TOXICITY_PATH";

    pub fn from_env() -> Self {
        let model_dir = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            model_dir,
            ..Default::default()
        }
    }

    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ToxicityError> {
        if self.max_seq_len == 0 {
            return Err(ToxicityError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        let Some(model_dir) = self.model_dir.as_ref() else {
            return Err(ToxicityError::InvalidConfig {
                reason: "no toxicity model directory configured".to_string(),
            });
        };

        if !model_dir.is_dir() {
            return Err(ToxicityError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        if let Some(missing) = missing_model_file(model_dir) {
            return Err(ToxicityError::ModelLoadFailed {
                reason: format!("Missing {} in {}", missing, model_dir.display()),
            });
        }

        Ok(())
    }

    pub fn model_available(&self) -> bool {
        self.model_dir.as_ref().is_some_and(|dir| dir.is_dir())
    }
}
