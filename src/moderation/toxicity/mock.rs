use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ToxicityError, ToxicityModel, ToxicityScores};

/// Classifier returning canned scores, or a canned error.
pub struct MockToxicityModel {
    outcome: Result<ToxicityScores, String>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl MockToxicityModel {
    /// Always returns `scores`.
    pub fn new(scores: ToxicityScores) -> Self {
        Self {
            outcome: Ok(scores),
            unavailable: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always reports a model that never loaded.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            unavailable: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails at inference time.
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            unavailable: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ToxicityModel for MockToxicityModel {
    fn classify(&self, _text: &str) -> Result<ToxicityScores, ToxicityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(scores) => Ok(*scores),
            Err(reason) if self.unavailable => Err(ToxicityError::Unavailable {
                reason: reason.clone(),
            }),
            Err(reason) => Err(ToxicityError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }
}
