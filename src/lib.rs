//! SkillSwap engine: semantic skill matching and content moderation.
//!
//! # Public API Surface
//!
//! ## Matching
//! - [`SkillMatcher`] ranks [`CandidateProfile`]s against wanted skills and
//!   returns [`MatchResult`]s (semantic similarity blended with a contextual
//!   profile-quality score, see [`MatchWeights`]).
//! - [`SimilarityScorer`] exposes set-vs-set similarity and query-vs-candidates
//!   ranking over any [`TextEncoder`].
//! - [`SkillEncoder`] is the BERT sentence encoder (lazy load, stub mode,
//!   embedding cache).
//! - [`matching::catalog`] holds the fixed skill taxonomy helpers.
//!
//! ## Moderation
//! - [`ContentModerator`] produces a [`ModerationVerdict`] from spam, toxicity,
//!   inappropriate-topic and suspicious-structure checks.
//! - [`ToxicityClassifier`] wraps a BERT multi-label toxicity model; without
//!   one, moderation uses rule-based toxicity detection.
//!
//! ## Service
//! - [`SkillSwapEngine`] owns one matcher and one moderator built from
//!   [`EngineConfig`].
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod hashing;
pub mod matching;
pub mod moderation;
pub mod scoring;

pub use config::{ConfigError, EngineConfig};
pub use constants::{DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockTextEncoder;
pub use embedding::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EmbeddingError, EncoderConfig, SkillEncoder,
    TextEncoder,
};
pub use engine::SkillSwapEngine;
pub use hashing::{hash_to_u64, hash_token};
pub use matching::{
    CandidateProfile, MatchResult, MatchWeights, SkillMatcher, categorize_skill,
    complementary_skills, normalize_skill, skill_categories, suggest_learning_path,
    trending_skills,
};
#[cfg(any(test, feature = "mock"))]
pub use moderation::MockToxicityModel;
pub use moderation::{
    ContentModerator, ContentType, ModerationCategory, ModerationError, ModerationThresholds,
    ModerationVerdict, ToxicityClassifier, ToxicityConfig, ToxicityError, ToxicityModel,
    ToxicityScores, ToxicityThresholds, clean_content,
};
pub use scoring::{SimilarityScorer, SkillMatch, contextual_score, cosine_similarity};
