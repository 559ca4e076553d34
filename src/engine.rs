//! Long-lived service object owning one matcher and one moderator.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::embedding::{SkillEncoder, TextEncoder};
use crate::matching::{CandidateProfile, MatchResult, SkillMatcher};
use crate::moderation::{
    ContentModerator, ContentType, ModerationVerdict, ToxicityClassifier, ToxicityModel,
};
use crate::scoring::SkillMatch;

/// Matching and moderation behind one handle. Cheap to clone and share.
///
/// Models load lazily on the first call that needs them.
#[derive(Debug, Clone)]
pub struct SkillSwapEngine {
    matcher: SkillMatcher,
    moderator: ContentModerator,
    top_k: usize,
    skill_match_threshold: f32,
}

impl SkillSwapEngine {
    /// Validates `config` and builds the encoder and toxicity classifier it names.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if config.uses_stub_encoder() {
            warn!(
                forced = config.stub_encoder,
                "Using deterministic STUB skill encoder (set SKILLSWAP_ENCODER_PATH for real embeddings)"
            );
        }
        let encoder: Arc<dyn TextEncoder> = Arc::new(SkillEncoder::new(config.encoder_config()));

        let mut moderator = ContentModerator::new();
        match config.toxicity_config() {
            Some(toxicity) => {
                let classifier: Arc<dyn ToxicityModel> = Arc::new(ToxicityClassifier::new(toxicity));
                moderator = moderator.with_toxicity_model(classifier);
            }
            None => info!("No toxicity model configured, using rule-based toxicity detection"),
        }

        Ok(Self {
            matcher: SkillMatcher::new(encoder).with_weights(config.weights),
            moderator,
            top_k: config.top_k,
            skill_match_threshold: config.skill_match_threshold,
        })
    }

    /// Engine from `SKILLSWAP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&EngineConfig::from_env()?)
    }

    /// Engine assembled from already-built parts (tests, custom models).
    pub fn with_parts(matcher: SkillMatcher, moderator: ContentModerator) -> Self {
        let defaults = EngineConfig::default();
        Self {
            matcher,
            moderator,
            top_k: defaults.top_k,
            skill_match_threshold: defaults.skill_match_threshold,
        }
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    pub fn moderator(&self) -> &ContentModerator {
        &self.moderator
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Ranks `candidates`, returning at most `top_k` (configured default when `None`).
    pub fn rank_matches<S: AsRef<str>>(
        &self,
        wanted: &[S],
        candidates: &[CandidateProfile],
        top_k: Option<usize>,
    ) -> Vec<MatchResult> {
        self.matcher
            .rank_matches(wanted, candidates, top_k.unwrap_or(self.top_k))
    }

    /// Candidate skills similar to `query`, at the configured threshold when `None`.
    pub fn ranked_skill_matches<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        threshold: Option<f32>,
    ) -> Vec<SkillMatch> {
        self.matcher.ranked_skill_matches(
            query,
            candidates,
            threshold.unwrap_or(self.skill_match_threshold),
        )
    }

    pub fn moderate(&self, content: &str, content_type: ContentType) -> ModerationVerdict {
        self.moderator.moderate(content, content_type)
    }

    pub fn is_spammy(&self, content: &str) -> bool {
        self.moderator.is_spammy(content)
    }

    pub fn is_appropriate_skill(&self, skill: &str) -> bool {
        self.moderator.is_appropriate_skill(skill)
    }
}
