//! Skill encoder (BERT sentence embeddings, or a deterministic stub).
//!
//! The backend is loaded once, on first use, and shared read-only by every
//! caller afterwards. A failed load is remembered: later calls report
//! [`EmbeddingError::Unavailable`] instead of retrying the multi-second load.
//!
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use std::sync::{Arc, OnceLock};

use candle_core::{Device, Tensor};
use moka::sync::Cache;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info, warn};

use super::TextEncoder;
use crate::constants::validate_embedding_dim;
use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_batch_tokenizer;
use crate::hashing::hash_token;

enum EncoderBackend {
    Model {
        model: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Embedding generator for skill text (supports stub mode).
pub struct SkillEncoder {
    config: EncoderConfig,
    backend: OnceLock<Result<EncoderBackend, String>>,
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl std::fmt::Debug for SkillEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self.backend.get() {
            None => "Unloaded".to_string(),
            Some(Ok(EncoderBackend::Model { device, .. })) => format!("Model({:?})", device),
            Some(Ok(EncoderBackend::Stub)) => "Stub".to_string(),
            Some(Err(_)) => "Unavailable".to_string(),
        };

        f.debug_struct("SkillEncoder")
            .field("backend", &backend)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl SkillEncoder {
    /// Creates an encoder that loads its model lazily on the first encode call.
    pub fn new(config: EncoderConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.cache_capacity).build();
        Self {
            config,
            backend: OnceLock::new(),
            cache,
        }
    }

    /// Creates an encoder and loads its backend immediately.
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        let encoder = Self::new(config);
        encoder.ensure_loaded()?;
        Ok(encoder)
    }

    /// Deterministic stub encoder with the default dimension.
    pub fn stub() -> Self {
        Self::new(EncoderConfig::stub())
    }

    /// Loads the backend if needed and reports whether it is usable.
    pub fn ensure_loaded(&self) -> Result<(), EmbeddingError> {
        self.backend().map(|_| ())
    }

    fn backend(&self) -> Result<&EncoderBackend, EmbeddingError> {
        let slot = self.backend.get_or_init(|| {
            Self::load_backend(&self.config).map_err(|e| {
                warn!(error = %e, "Skill encoder unavailable, matching will return no results");
                e.to_string()
            })
        });

        slot.as_ref().map_err(|reason| EmbeddingError::Unavailable {
            reason: reason.clone(),
        })
    }

    fn load_backend(config: &EncoderConfig) -> Result<EncoderBackend, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Skill encoder running in STUB mode (testing only)");
            return Ok(EncoderBackend::Stub);
        }

        let device = select_device(config.prefer_gpu)?;
        debug!(?device, "Selected compute device for skill encoder");

        let model_dir = config
            .model_dir
            .as_ref()
            .ok_or_else(|| EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            })?;

        let tokenizer = load_batch_tokenizer(model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let model =
            BertEncoder::load(model_dir, &device).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            })?;

        validate_embedding_dim(config.embedding_dim, model.hidden_size()).map_err(|e| {
            EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Skill encoder loaded successfully"
        );

        Ok(EncoderBackend::Model {
            model,
            tokenizer,
            device,
        })
    }

    /// Generates embeddings for a batch of strings, reusing cached vectors.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let backend = self.backend()?;

        let mut missing: Vec<&str> = Vec::new();
        for text in texts {
            if !self.cache.contains_key(*text) && !missing.contains(text) {
                missing.push(*text);
            }
        }

        if !missing.is_empty() {
            debug!(
                requested = texts.len(),
                uncached = missing.len(),
                "Encoding uncached texts"
            );

            let fresh = match backend {
                EncoderBackend::Model {
                    model,
                    tokenizer,
                    device,
                } => self.embed_with_model(&missing, model, tokenizer, device)?,
                EncoderBackend::Stub => missing.iter().map(|t| self.embed_stub(t)).collect(),
            };

            for (text, embedding) in missing.iter().zip(fresh) {
                self.cache.insert((*text).to_string(), Arc::new(embedding));
            }
        }

        texts
            .iter()
            .map(|text| match self.cache.get(*text) {
                Some(embedding) => Ok(embedding.as_ref().clone()),
                // Evicted between insert and read under a tiny capacity.
                None => self.encode_uncached(backend, text),
            })
            .collect()
    }

    fn encode_uncached(
        &self,
        backend: &EncoderBackend,
        text: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        match backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self
                .embed_with_model(&[text], model, tokenizer, device)?
                .pop()
                .ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "model returned no embedding".to_string(),
                }),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        texts: &[&str],
        model: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            batch = texts.len(),
            seq_len = encodings.first().map(|e| e.len()).unwrap_or(0),
            "Generating embeddings (BERT forward pass)"
        );

        let input_ids = stack_rows(&encodings, device, Encoding::get_ids)?;
        let type_ids = stack_rows(&encodings, device, Encoding::get_type_ids)?;
        let attention_mask = stack_rows(&encodings, device, Encoding::get_attention_mask)?;

        let embeddings = model
            .embed(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        Ok(embeddings.to_vec2::<f32>()?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let lowered = text.to_lowercase();
        let mut embedding = vec![0.0f32; dim];

        for token in lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .filter(|t| !t.is_empty())
        {
            for (acc, value) in embedding.iter_mut().zip(token_direction(token, dim)) {
                *acc += value;
            }
        }

        normalize(&mut embedding);
        embedding
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        self.config.testing_stub
    }

    /// Returns `true` if a real model has been loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend.get(), Some(Ok(EncoderBackend::Model { .. })))
    }

    /// Number of memoised embeddings.
    pub fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl TextEncoder for SkillEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.encode_batch(texts)
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }
}

fn stack_rows(
    encodings: &[Encoding],
    device: &Device,
    field: fn(&Encoding) -> &[u32],
) -> Result<Tensor, EmbeddingError> {
    let rows = encodings
        .iter()
        .map(|encoding| Tensor::new(field(encoding), device))
        .collect::<candle_core::Result<Vec<_>>>()?;
    Ok(Tensor::stack(&rows, 0)?)
}

/// Unit-length pseudo-random direction for one stub token.
fn token_direction(token: &str, dim: usize) -> Vec<f32> {
    let mut state = hash_token(token);
    let mut direction = Vec::with_capacity(dim);

    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
        direction.push(value);
    }

    normalize(&mut direction);
    direction
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
