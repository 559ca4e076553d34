use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{EmbeddingError, TextEncoder};

/// Encoder with hand-picked vectors, for exercising scorer and ranker logic.
///
/// Texts without a registered vector encode to the zero vector.
pub struct MockTextEncoder {
    dim: usize,
    vectors: Mutex<HashMap<String, Vec<f32>>>,
    unavailable: Option<String>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl MockTextEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Mutex::new(HashMap::new()),
            unavailable: None,
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Encoder whose every call fails as if the model never loaded.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            unavailable: Some(reason.to_string()),
            ..Self::new(0)
        }
    }

    /// Registers the vector returned for `text` (exact match).
    pub fn with_vector(self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dim, "mock vector has wrong dimension");
        if let Ok(mut vectors) = self.vectors.lock() {
            vectors.insert(text.to_string(), vector);
        }
        self
    }

    /// Fails with an inference error once `calls` encode calls have succeeded.
    pub fn failing_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Number of encode calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextEncoder for MockTextEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if let Some(reason) = &self.unavailable {
            return Err(EmbeddingError::Unavailable {
                reason: reason.clone(),
            });
        }

        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| call >= limit) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock inference failure".to_string(),
            });
        }

        if texts.is_empty() {
            return Ok(vec![]);
        }

        let vectors = self
            .vectors
            .lock()
            .map_err(|_| EmbeddingError::InferenceFailed {
                reason: "mock vector table poisoned".to_string(),
            })?;

        Ok(texts
            .iter()
            .map(|text| {
                vectors
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.dim])
            })
            .collect())
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}
