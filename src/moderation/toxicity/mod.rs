//! Multi-label toxicity classifier adapter.
//!
//! [`ToxicityClassifier`] wraps a BERT multi-label head (Detoxify-style
//! labels). Every call returns either scores or a typed error; the moderator
//! treats any error as "no signal" and falls back to rule-based detection.

pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::ToxicityConfig;
pub use error::ToxicityError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockToxicityModel;

use std::sync::OnceLock;

use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_batch_tokenizer;

/// Per-label probabilities in `[0, 1]`. Labels the model lacks stay at `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToxicityScores {
    pub toxicity: f32,
    pub severe_toxicity: f32,
    pub obscene: f32,
    pub threat: f32,
    pub insult: f32,
    pub identity_attack: f32,
}

impl ToxicityScores {
    /// Builds scores from model labels and one probability per label.
    ///
    /// Accepts both Detoxify names and the Jigsaw originals (`toxic`,
    /// `severe_toxic`, `identity_hate`). Unknown labels are ignored.
    pub fn from_labels<S: AsRef<str>>(labels: &[S], probs: &[f32]) -> Self {
        let mut scores = Self::default();
        for (label, prob) in labels.iter().zip(probs) {
            if let Some(slot) = scores.slot_mut(label.as_ref()) {
                *slot = prob.clamp(0.0, 1.0);
            }
        }
        scores
    }

    fn slot_mut(&mut self, label: &str) -> Option<&mut f32> {
        match label.trim().to_ascii_lowercase().as_str() {
            "toxicity" | "toxic" => Some(&mut self.toxicity),
            "severe_toxicity" | "severe_toxic" => Some(&mut self.severe_toxicity),
            "obscene" => Some(&mut self.obscene),
            "threat" => Some(&mut self.threat),
            "insult" => Some(&mut self.insult),
            "identity_attack" | "identity_hate" => Some(&mut self.identity_attack),
            _ => None,
        }
    }

    /// `(label, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> {
        [
            ("toxicity", self.toxicity),
            ("severe_toxicity", self.severe_toxicity),
            ("obscene", self.obscene),
            ("threat", self.threat),
            ("insult", self.insult),
            ("identity_attack", self.identity_attack),
        ]
        .into_iter()
    }

    pub fn max(&self) -> f32 {
        self.iter().map(|(_, score)| score).fold(0.0, f32::max)
    }

    /// Labels scoring strictly above `threshold`.
    pub fn labels_above(&self, threshold: f32) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, score)| *score > threshold)
            .map(|(label, _)| label)
            .collect()
    }
}

/// Text → toxicity scores contract used by the moderator.
pub trait ToxicityModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<ToxicityScores, ToxicityError>;
}

struct ClassifierBackend {
    model: BertClassifier,
    tokenizer: Tokenizer,
    device: Device,
}

/// BERT toxicity classifier, loaded once on first use.
pub struct ToxicityClassifier {
    config: ToxicityConfig,
    backend: OnceLock<Result<ClassifierBackend, String>>,
}

impl std::fmt::Debug for ToxicityClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.backend.get() {
            None => "Unloaded".to_string(),
            Some(Ok(backend)) => format!("Loaded({:?})", backend.device),
            Some(Err(_)) => "Unavailable".to_string(),
        };

        f.debug_struct("ToxicityClassifier")
            .field("model_dir", &self.config.model_dir)
            .field("state", &state)
            .finish()
    }
}

impl ToxicityClassifier {
    pub fn new(config: ToxicityConfig) -> Self {
        Self {
            config,
            backend: OnceLock::new(),
        }
    }

    /// Creates a classifier and loads it immediately.
    pub fn load(config: ToxicityConfig) -> Result<Self, ToxicityError> {
        let classifier = Self::new(config);
        classifier.ensure_loaded()?;
        Ok(classifier)
    }

    pub fn ensure_loaded(&self) -> Result<(), ToxicityError> {
        self.backend().map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.backend.get(), Some(Ok(_)))
    }

    pub fn config(&self) -> &ToxicityConfig {
        &self.config
    }

    fn backend(&self) -> Result<&ClassifierBackend, ToxicityError> {
        let slot = self.backend.get_or_init(|| {
            Self::load_backend(&self.config).map_err(|e| {
                warn!(error = %e, "Toxicity classifier unavailable, using rule-based detection only");
                e.to_string()
            })
        });

        slot.as_ref().map_err(|reason| ToxicityError::Unavailable {
            reason: reason.clone(),
        })
    }

    fn load_backend(config: &ToxicityConfig) -> Result<ClassifierBackend, ToxicityError> {
        config.validate()?;

        let model_dir = config
            .model_dir
            .as_ref()
            .ok_or_else(|| ToxicityError::InvalidConfig {
                reason: "no toxicity model directory configured".to_string(),
            })?;

        let device = select_device(config.prefer_gpu)?;
        debug!(?device, "Selected compute device for toxicity classifier");

        let model = BertClassifier::load(model_dir, &device).map_err(|e| {
            ToxicityError::ModelLoadFailed {
                reason: format!("Failed to load BERT classifier: {}", e),
            }
        })?;

        let tokenizer = load_batch_tokenizer(model_dir, config.max_seq_len).map_err(|e| {
            ToxicityError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            labels = ?model.labels(),
            "Toxicity classifier loaded successfully"
        );

        Ok(ClassifierBackend {
            model,
            tokenizer,
            device,
        })
    }
}

impl ToxicityModel for ToxicityClassifier {
    fn classify(&self, text: &str) -> Result<ToxicityScores, ToxicityError> {
        let backend = self.backend()?;

        let tokens = backend.tokenizer.encode(text, true).map_err(|e| {
            ToxicityError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            text_len = text.len(),
            seq_len = tokens.len(),
            "Classifying toxicity"
        );

        let input_ids = Tensor::new(tokens.get_ids(), &backend.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &backend.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &backend.device)?.unsqueeze(0)?;

        let probs = backend
            .model
            .predict(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| ToxicityError::InferenceFailed {
                reason: e.to_string(),
            })?
            .flatten_all()?
            .to_vec1::<f32>()?;

        Ok(ToxicityScores::from_labels(backend.model.labels(), &probs))
    }
}
