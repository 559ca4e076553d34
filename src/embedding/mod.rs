//! Embedding + model utilities.
//!
//! - [`encoder`] turns skill text into sentence embeddings.
//! - [`bert`] holds the BERT loaders shared with the toxicity classifier in
//!   [`crate::moderation::toxicity`].

/// BERT sentence encoder and multi-label classifier wrappers.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Skill encoder (lazy model load, stub mode, embedding cache).
pub mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use encoder::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SkillEncoder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTextEncoder;

/// Text → fixed-length vector contract used by the similarity scorer.
///
/// Implementations must be safe to share across threads; inference must not
/// mutate model state.
pub trait TextEncoder: Send + Sync {
    /// Encodes every text; the result has one row per input, in input order.
    ///
    /// Empty input returns an empty result, never an error.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Length of every returned row.
    fn embedding_dim(&self) -> usize;
}
