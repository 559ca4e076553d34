//! Semantic and contextual scoring for skill matching.
//!
//! - [`similarity`] compares skill lists through a [`TextEncoder`](crate::embedding::TextEncoder).
//! - [`contextual`] scores profile quality without looking at skill meaning.
//!
//! [`crate::matching::SkillMatcher`] blends the two into a ranked list.

pub mod contextual;
pub mod similarity;
pub mod types;


pub use contextual::{contextual_score, profile_completeness};
pub use similarity::{SimilarityScorer, cosine_similarity, max_pairwise_similarity};
pub use types::SkillMatch;
