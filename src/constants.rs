//! Cross-cutting, shared constants.
//!
//! Secondary values (config defaults, thresholds) are derived from these so the
//! matcher, encoder and moderator agree on the same numbers.

/// Output dimension of the default sentence encoder (all-MiniLM-L6-v2).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens per skill string fed to the encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Max tokens per moderated text fed to the toxicity classifier.
pub const DEFAULT_CLASSIFIER_MAX_SEQ_LEN: usize = 512;

/// Weight of embedding similarity in the blended match score.
pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.7;

/// Weight of the profile-quality score in the blended match score.
pub const DEFAULT_CONTEXTUAL_WEIGHT: f32 = 0.3;

/// Number of matches returned when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 5;

/// Minimum cosine similarity for [`ranked_matches`](crate::scoring::SimilarityScorer::ranked_matches).
pub const DEFAULT_SKILL_MATCH_THRESHOLD: f32 = 0.3;

/// Max skill embeddings memoised per encoder.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

/// Weight sums are compared with this tolerance.
pub const WEIGHT_SUM_EPSILON: f32 = 1e-4;

/// Error returned when a loaded model disagrees with the configured dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Checks a model's hidden size against the configured embedding dimension.
pub fn validate_embedding_dim(expected: usize, actual: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if expected != actual {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
