//! Candidate ranking for a requester's wanted skills.
//!
//! Each candidate that offers at least one skill gets a semantic score (best
//! wanted/offered pair) and a contextual score (profile quality), blended by
//! [`MatchWeights`]. Results are sorted best first, ties in input order.

pub mod catalog;
pub mod normalize;
pub mod types;

#[cfg(test)]
mod tests;

pub use catalog::{
    OTHER_CATEGORY, categorize_skill, complementary_skills, skill_categories,
    suggest_learning_path, trending_skills,
};
pub use normalize::{normalize_skill, normalize_skills};
pub use types::{CandidateProfile, MatchResult, MatchWeights};

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::embedding::{EmbeddingError, TextEncoder};
use crate::scoring::{SimilarityScorer, SkillMatch, contextual_score, max_pairwise_similarity};

/// Ranks candidate profiles against wanted skills.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    scorer: SimilarityScorer,
    weights: MatchWeights,
}

impl SkillMatcher {
    /// Matcher with the default 0.7 semantic / 0.3 contextual blend.
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self {
            scorer: SimilarityScorer::new(encoder),
            weights: MatchWeights::default(),
        }
    }

    /// Replaces the blend weights. Callers validate with [`MatchWeights::validate`].
    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Top `top_k` candidates for `wanted`, best first.
    ///
    /// Empty when `wanted` or `candidates` is empty, or when the encoder fails.
    pub fn rank_matches<S: AsRef<str>>(
        &self,
        wanted: &[S],
        candidates: &[CandidateProfile],
        top_k: usize,
    ) -> Vec<MatchResult> {
        self.try_rank_matches(wanted, candidates, top_k)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Match ranking unavailable, returning no matches");
                vec![]
            })
    }

    /// Like [`rank_matches`](Self::rank_matches) but surfaces encoder errors.
    pub fn try_rank_matches<S: AsRef<str>>(
        &self,
        wanted: &[S],
        candidates: &[CandidateProfile],
        top_k: usize,
    ) -> Result<Vec<MatchResult>, EmbeddingError> {
        if wanted.is_empty() || candidates.is_empty() || top_k == 0 {
            return Ok(vec![]);
        }

        let wanted_rows = self.scorer.encode_skills(wanted)?;

        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates.iter().filter(|c| c.is_matchable()) {
            let offered_rows = self.scorer.encode_skills(&candidate.skills_offered)?;
            let semantic = max_pairwise_similarity(&wanted_rows, &offered_rows)
                .unwrap_or(0.0)
                .max(0.0);
            let contextual = contextual_score(candidate);

            results.push(MatchResult {
                candidate: candidate.clone(),
                score: self.weights.blend(semantic, contextual),
                semantic,
                contextual,
            });
        }

        let scored = results.len();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        debug!(
            wanted = wanted.len(),
            candidates = candidates.len(),
            scored,
            returned = results.len(),
            top_k,
            "Ranked candidate matches"
        );

        Ok(results)
    }

    /// Similarity between two single skills, in `[0, 1]`.
    pub fn skill_similarity(&self, a: &str, b: &str) -> f32 {
        self.scorer.set_similarity(&[a], &[b])
    }

    /// Candidate skills at least `threshold` similar to `query`, best first.
    pub fn ranked_skill_matches<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        threshold: f32,
    ) -> Vec<SkillMatch> {
        self.scorer.ranked_matches(query, candidates, threshold)
    }
}
