//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SKILLSWAP_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_SKILL_MATCH_THRESHOLD, DEFAULT_TOP_K,
};
use crate::embedding::EncoderConfig;
use crate::matching::MatchWeights;
use crate::moderation::ToxicityConfig;

/// Engine configuration loaded from environment variables.
///
/// Use [`EngineConfig::from_env`] to read `SKILLSWAP_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sentence-encoder model directory. `None` selects the stub encoder.
    pub encoder_path: Option<PathBuf>,

    /// Toxicity classifier directory. `None` means rule-based toxicity only.
    pub toxicity_path: Option<PathBuf>,

    /// Max memoised skill embeddings. Default: `10_000`.
    pub embedding_cache_capacity: u64,

    /// Default number of matches returned. Default: `5`.
    pub top_k: usize,

    /// Default threshold for ranked skill matches. Default: `0.3`.
    pub skill_match_threshold: f32,

    /// Force the deterministic stub encoder even when a path is set.
    pub stub_encoder: bool,

    /// Semantic/contextual blend. Default: `0.7` / `0.3`.
    pub weights: MatchWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            encoder_path: None,
            toxicity_path: None,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
            top_k: DEFAULT_TOP_K,
            skill_match_threshold: DEFAULT_SKILL_MATCH_THRESHOLD,
            stub_encoder: false,
            weights: MatchWeights::default(),
        }
    }
}

impl EngineConfig {
    const ENV_ENCODER_PATH: &'static str = EncoderConfig::ENV_MODEL_PATH;
    const ENV_TOXICITY_PATH: &'static str = ToxicityConfig::ENV_MODEL_PATH;
    const ENV_CACHE_CAPACITY: &'static str = "SKILLSWAP_EMBEDDING_CACHE_CAPACITY";
    const ENV_TOP_K: &'static str = "SKILLSWAP_TOP_K";
    const ENV_THRESHOLD: &'static str = "SKILLSWAP_SKILL_MATCH_THRESHOLD";
    const ENV_STUB_ENCODER: &'static str = EncoderConfig::ENV_STUB;

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let toxicity_path = Self::parse_optional_path_from_env(Self::ENV_TOXICITY_PATH);
        let embedding_cache_capacity =
            Self::parse_number_from_env(Self::ENV_CACHE_CAPACITY, defaults.embedding_cache_capacity)?;
        let top_k = Self::parse_top_k_from_env(defaults.top_k)?;
        let skill_match_threshold =
            Self::parse_number_from_env(Self::ENV_THRESHOLD, defaults.skill_match_threshold)?;
        let stub_encoder = Self::parse_bool_from_env(Self::ENV_STUB_ENCODER);

        Ok(Self {
            encoder_path,
            toxicity_path,
            embedding_cache_capacity,
            top_k,
            skill_match_threshold,
            stub_encoder,
            weights: defaults.weights,
        })
    }

    /// Validates paths and numeric ranges (does not load any model).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.encoder_path {
            Self::validate_model_dir(path)?;
        }

        if let Some(path) = &self.toxicity_path {
            Self::validate_model_dir(path)?;
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK {
                value: self.top_k.to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.skill_match_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.skill_match_threshold,
            });
        }

        self.weights
            .validate()
            .map_err(|reason| ConfigError::InvalidWeights { reason })?;

        Ok(())
    }

    /// Returns `true` when matching runs on the deterministic stub encoder.
    pub fn uses_stub_encoder(&self) -> bool {
        self.stub_encoder || self.encoder_path.is_none()
    }

    /// Encoder settings derived from this config.
    pub fn encoder_config(&self) -> EncoderConfig {
        let base = match (&self.encoder_path, self.uses_stub_encoder()) {
            (Some(path), false) => EncoderConfig::new(path.clone()),
            _ => EncoderConfig::stub(),
        };
        base.with_cache_capacity(self.embedding_cache_capacity)
    }

    /// Toxicity classifier settings, if a classifier is configured.
    pub fn toxicity_config(&self) -> Option<ToxicityConfig> {
        self.toxicity_path.as_ref().map(ToxicityConfig::new)
    }

    fn validate_model_dir(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_top_k_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_TOP_K) {
            Ok(value) => {
                let top_k: usize = Self::parse_number(Self::ENV_TOP_K, &value)?;
                if top_k == 0 {
                    return Err(ConfigError::InvalidTopK { value });
                }
                Ok(top_k)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => Self::parse_number(var_name, &value),
            Err(_) => Ok(default),
        }
    }

    fn parse_number<T>(var_name: &'static str, value: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidNumber {
                name: var_name,
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_bool_from_env(var_name: &str) -> bool {
        env::var(var_name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false)
    }
}
