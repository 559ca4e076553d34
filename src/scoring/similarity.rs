use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use super::types::SkillMatch;
use crate::embedding::{EmbeddingError, TextEncoder};
use crate::matching::normalize::normalize_skills;

/// Cosine similarity clamped to `[-1, 1]`.
///
/// Zero-length or mismatched vectors, and zero vectors, give `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f32::EPSILON {
        return 0.0;
    }

    (dot / denom).clamp(-1.0, 1.0)
}

/// Largest entry of the pairwise cosine matrix, or `None` if either side is empty.
pub fn max_pairwise_similarity(a: &[Vec<f32>], b: &[Vec<f32>]) -> Option<f32> {
    a.iter()
        .flat_map(|x| b.iter().map(move |y| cosine_similarity(x, y)))
        .max_by(|x, y| x.total_cmp(y))
}

/// Embedding similarity between skill lists.
///
/// Skills are normalised (see [`crate::matching::normalize`]) before encoding.
#[derive(Clone)]
pub struct SimilarityScorer {
    encoder: Arc<dyn TextEncoder>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("embedding_dim", &self.encoder.embedding_dim())
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &Arc<dyn TextEncoder> {
        &self.encoder
    }

    /// Normalises then encodes `skills`, one row per skill.
    pub fn encode_skills<S: AsRef<str>>(
        &self,
        skills: &[S],
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if skills.is_empty() {
            return Ok(vec![]);
        }

        let normalized = normalize_skills(skills);
        let texts: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let rows = self.encoder.encode(&texts)?;

        if rows.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "encoder returned {} rows for {} inputs",
                    rows.len(),
                    texts.len()
                ),
            });
        }

        Ok(rows)
    }

    /// Best raw cosine between any skill of `a` and any skill of `b`, in `[-1, 1]`.
    ///
    /// Empty input on either side is `Ok(0.0)`.
    pub fn try_set_similarity<A: AsRef<str>, B: AsRef<str>>(
        &self,
        a: &[A],
        b: &[B],
    ) -> Result<f32, EmbeddingError> {
        if a.is_empty() || b.is_empty() {
            return Ok(0.0);
        }

        let left = self.encode_skills(a)?;
        let right = self.encode_skills(b)?;
        Ok(max_pairwise_similarity(&left, &right).unwrap_or(0.0))
    }

    /// Best pairwise similarity in `[0, 1]`; `0.0` for empty input or encoder failure.
    pub fn set_similarity<A: AsRef<str>, B: AsRef<str>>(&self, a: &[A], b: &[B]) -> f32 {
        match self.try_set_similarity(a, b) {
            Ok(score) => score.max(0.0),
            Err(e) => {
                warn!(error = %e, "Set similarity unavailable, scoring as 0.0");
                0.0
            }
        }
    }

    /// Candidates whose similarity to `query` is at least `threshold`, best first.
    ///
    /// Ties keep candidate input order.
    pub fn try_ranked_matches<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        threshold: f32,
    ) -> Result<Vec<SkillMatch>, EmbeddingError> {
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let query_rows = self.encode_skills(&[query])?;
        let candidate_rows = self.encode_skills(candidates)?;
        let Some(query_row) = query_rows.first() else {
            return Ok(vec![]);
        };

        let mut matches: Vec<SkillMatch> = candidates
            .iter()
            .zip(&candidate_rows)
            .filter_map(|(skill, row)| {
                let score = cosine_similarity(query_row, row);
                (score >= threshold).then(|| SkillMatch::new(skill.as_ref(), score.max(0.0)))
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            query_len = query.len(),
            candidates = candidates.len(),
            hits = matches.len(),
            threshold = threshold,
            "Ranked skill matches"
        );

        Ok(matches)
    }

    /// Like [`try_ranked_matches`](Self::try_ranked_matches); empty on encoder failure.
    pub fn ranked_matches<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        threshold: f32,
    ) -> Vec<SkillMatch> {
        self.try_ranked_matches(query, candidates, threshold)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Skill ranking unavailable, returning no matches");
                vec![]
            })
    }
}
