use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Candidate skill with its similarity to a query skill.
pub struct SkillMatch {
    pub skill: String,
    /// Cosine similarity floored at 0.
    pub score: f32,
}

impl SkillMatch {
    pub fn new(skill: impl Into<String>, score: f32) -> Self {
        Self {
            skill: skill.into(),
            score,
        }
    }

    /// Returns `true` if `score` is at least `threshold`.
    pub fn meets_threshold(&self, threshold: f32) -> bool {
        self.score >= threshold
    }
}
