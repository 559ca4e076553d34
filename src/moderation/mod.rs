//! Content moderation: spam, toxicity, inappropriate topics, suspicious structure.
//!
//! [`ContentModerator::moderate`] runs all four checks on trimmed input and
//! merges them into one [`ModerationVerdict`]. Toxicity comes from an optional
//! [`ToxicityModel`]; when it is missing or fails, a rule-based check is used
//! for that call.

pub mod checks;
pub mod clean;
pub mod error;
pub mod rules;
pub mod thresholds;
pub mod toxicity;
pub mod types;


pub use clean::clean_content;
pub use error::ModerationError;
pub use thresholds::{ModerationThresholds, ToxicityThresholds};
#[cfg(any(test, feature = "mock"))]
pub use toxicity::MockToxicityModel;
pub use toxicity::{ToxicityClassifier, ToxicityConfig, ToxicityError, ToxicityModel, ToxicityScores};
pub use types::{CheckOutcome, ContentType, ModerationCategory, ModerationVerdict};

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

/// Runs the moderation checks with a fixed set of thresholds.
#[derive(Clone, Default)]
pub struct ContentModerator {
    toxicity: Option<Arc<dyn ToxicityModel>>,
    thresholds: ModerationThresholds,
}

impl std::fmt::Debug for ContentModerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentModerator")
            .field("has_toxicity_model", &self.toxicity.is_some())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl ContentModerator {
    /// Rule-based moderator (no toxicity classifier).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toxicity_model(mut self, model: Arc<dyn ToxicityModel>) -> Self {
        self.toxicity = Some(model);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ModerationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &ModerationThresholds {
        &self.thresholds
    }

    /// Moderates `content` shown as `content_type`.
    pub fn moderate(&self, content: &str, content_type: ContentType) -> ModerationVerdict {
        let content = content.trim();
        if content.is_empty() {
            return ModerationVerdict::empty();
        }

        let outcomes = [
            (
                ModerationCategory::Spam,
                checks::spam(content, &self.thresholds),
            ),
            (ModerationCategory::Toxic, self.check_toxicity(content)),
            (
                ModerationCategory::Inappropriate,
                checks::inappropriate(content, content_type),
            ),
            (
                ModerationCategory::Suspicious,
                checks::suspicious(content, &self.thresholds),
            ),
        ];

        let mut categories = BTreeSet::new();
        let mut confidence = 0.0f32;
        let mut reasons = Vec::new();

        for (category, outcome) in outcomes {
            if outcome.flagged {
                categories.insert(category);
                confidence = confidence.max(outcome.confidence);
                reasons.push(outcome.reason);
            }
        }

        let is_flagged = !categories.is_empty();
        let reason = if is_flagged {
            reasons.join("; ")
        } else {
            ModerationVerdict::PASSED_REASON.to_string()
        };

        debug!(
            content_type = %content_type,
            content_len = content.len(),
            is_flagged,
            categories = ?categories,
            confidence,
            "Moderated content"
        );

        ModerationVerdict {
            is_flagged,
            confidence: confidence.clamp(0.0, 1.0),
            categories,
            reason,
            cleaned_content: (!is_flagged).then(|| clean_content(content)),
        }
    }

    /// Classifier decision when available, rule-based otherwise.
    fn check_toxicity(&self, content: &str) -> CheckOutcome {
        let Some(model) = &self.toxicity else {
            return checks::toxicity_rules(content, &self.thresholds);
        };

        match model.classify(content) {
            Ok(scores) => checks::toxicity_scores(&scores, &self.thresholds.toxicity),
            Err(e) => {
                if e.is_unavailable() {
                    debug!(error = %e, "Toxicity classifier unavailable, using rules");
                } else {
                    warn!(error = %e, "Toxicity classification failed, using rules for this call");
                }
                checks::toxicity_rules(content, &self.thresholds)
            }
        }
    }

    /// Flagged as spam or suspicious, moderated as general content.
    ///
    /// Text flagged only as toxic or inappropriate is not spammy.
    pub fn is_spammy(&self, content: &str) -> bool {
        self.moderate(content, ContentType::General).is_spammy()
    }

    /// `true` if a skill name or description passes moderation.
    pub fn is_appropriate_skill(&self, skill: &str) -> bool {
        !self.moderate(skill, ContentType::Skill).is_flagged
    }

    /// See [`clean_content`].
    pub fn clean_content(&self, content: &str) -> String {
        clean_content(content)
    }
}
