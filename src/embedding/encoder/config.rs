use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::missing_model_file;

/// Default encoder embedding dimension.
pub const ENCODER_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default encoder max sequence length.
pub const ENCODER_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`SkillEncoder`](super::SkillEncoder).
pub struct EncoderConfig {
    /// Directory with `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: Option<PathBuf>,
    /// Max tokens to consider per text.
    pub max_seq_len: usize,
    /// Output embedding dimension (must equal the model's hidden size).
    pub embedding_dim: usize,
    /// Max memoised embeddings.
    pub cache_capacity: u64,
    /// Try Metal/CUDA before CPU when compiled in.
    pub prefer_gpu: bool,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            embedding_dim: ENCODER_EMBEDDING_DIM,
            cache_capacity: crate::constants::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            prefer_gpu: cfg!(any(feature = "metal", feature = "cuda")),
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_PATH: &'static str = "SKILLSWAP_ENCODER_PATH";
    /// Env var that forces stub mode (`1` or `true`).
    pub const ENV_STUB: &'static str = "SKILLSWAP_STUB_ENCODER";

    /// Loads config from environment variables (a missing path leaves `model_dir` unset).
    pub fn from_env() -> Self {
        let model_dir = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let testing_stub = std::env::var(Self::ENV_STUB)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self {
            model_dir,
            testing_stub,
            ..Default::default()
        }
    }

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            prefer_gpu: false,
            ..Default::default()
        }
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        let Some(model_dir) = self.model_dir.as_ref() else {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        };

        if !model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        if let Some(missing) = missing_model_file(model_dir) {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {} in {}", missing, model_dir.display()),
            });
        }

        Ok(())
    }

    /// Returns `true` if the model directory exists.
    pub fn model_available(&self) -> bool {
        self.model_dir.as_ref().is_some_and(|dir| dir.is_dir())
    }
}
